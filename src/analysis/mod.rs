//! Turning the canvas into an explanation.
//!
//! [`analyze`] captures the surface, encodes it and hands the payload to an
//! [`AnalysisClient`]. [`GeminiClient`] is the production client; tests plug
//! in their own.

mod gemini;
mod payload;
mod task;

pub use gemini::{GeminiClient, GeminiRequest, GeminiResponse};
pub use payload::{encode_png_data_url, prepare_payload, ImagePayload, PNG_MIME_TYPE};
pub use task::{AnalysisTask, Spawner, TaskPoll};

use futures::future;

use crate::error::AnalysisResult;
use crate::surface::DrawingSurface;

/// Instruction sent alongside every drawing.
pub const ANALYSIS_PROMPT: &str = "Analyze this drawing for a classroom smartboard. Provide a clear, educational response following this format:

For Mathematical Expressions:
📝 Expression: [Write the mathematical expression]
✍️ Solution: [Show the solution clearly]
📚 Key Concept: [Explain the main mathematical concept in 1-2 sentences]

For Drawings/Diagrams:
🎯 Main Topic: [Identify the subject/concept]
📋 Key Points:
• [Point 1]
• [Point 2]
• [Point 3]

Keep the response concise, educational, and suitable for classroom display. Use clear language that students can understand.";

/// A `'static` future; `Send` on native so it can run on the background runtime.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxedFuture<T> = future::BoxFuture<'static, T>;

/// A `'static` future; the browser executor is single-threaded.
#[cfg(target_arch = "wasm32")]
pub type BoxedFuture<T> = future::LocalBoxFuture<'static, T>;

#[cfg(not(target_arch = "wasm32"))]
pub fn boxed<F>(fut: F) -> BoxedFuture<F::Output>
where
    F: std::future::Future + Send + 'static,
{
    use futures::FutureExt as _;
    fut.boxed()
}

#[cfg(target_arch = "wasm32")]
pub fn boxed<F>(fut: F) -> BoxedFuture<F::Output>
where
    F: std::future::Future + 'static,
{
    use futures::FutureExt as _;
    fut.boxed_local()
}

/// Anything that can turn an image into text.
pub trait AnalysisClient {
    /// Issues a single request. The returned future owns everything it needs.
    fn analyze(&self, image: ImagePayload) -> BoxedFuture<AnalysisResult<String>>;
}

/// Captures `surface` and sends it through `client`.
///
/// Capture and encoding happen synchronously; only the request itself is
/// deferred. Capture failures resolve immediately with the error.
pub fn analyze(client: &dyn AnalysisClient, surface: &DrawingSurface) -> BoxedFuture<AnalysisResult<String>> {
    log::info!("Preparing image data for analysis...");
    let payload = surface
        .export_bitmap()
        .and_then(|bitmap| prepare_payload(&bitmap));

    match payload {
        Ok(payload) => {
            log::debug!("Payload holds {} base64 characters", payload.data().len());
            client.analyze(payload)
        }
        Err(err) => {
            log::error!("Could not capture the canvas: {}", err);
            boxed(future::ready(Err(err)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingClient {
        seen: RefCell<Vec<ImagePayload>>,
    }

    impl AnalysisClient for RecordingClient {
        fn analyze(&self, image: ImagePayload) -> BoxedFuture<AnalysisResult<String>> {
            self.seen.borrow_mut().push(image);
            boxed(future::ready(Ok("ok".to_owned())))
        }
    }

    #[test]
    fn test_uninitialized_surface_never_reaches_client() {
        let client = RecordingClient::default();
        let result = block_on(analyze(&client, &DrawingSurface::new()));
        assert_eq!(result, Err(AnalysisError::NotInitialized));
        assert!(client.seen.borrow().is_empty());
    }

    #[test]
    fn test_empty_canvas_is_sent_as_png() {
        let client = RecordingClient::default();
        let result = block_on(analyze(&client, &DrawingSurface::with_size(40, 30)));
        assert_eq!(result.as_deref(), Ok("ok"));

        let seen = client.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].mime_type(), "image/png");
        assert!(!seen[0].data().starts_with("data:"));
    }

    #[test]
    fn test_prompt_describes_both_shapes() {
        assert!(ANALYSIS_PROMPT.contains("Expression:"));
        assert!(ANALYSIS_PROMPT.contains("Key Points:"));
    }
}
