use std::rc::Rc;

use egui::{Pos2, Vec2};

use crate::analysis::{self, AnalysisClient, AnalysisTask, BoxedFuture, TaskPoll};
use crate::error::AnalysisResult;
use crate::state::UiState;
use crate::surface::DrawingSurface;

/// One page session: UI state, the drawing surface, and at most one request in flight.
///
/// All methods run on the UI thread and return immediately. Starting an
/// analysis hands back a driver future for the caller to spawn.
///
/// The in-flight handle outlives a Clear: the displayed status resets at once,
/// but a new request cannot start until the old one settles.
pub struct Session {
    state: UiState,
    surface: DrawingSurface,
    client: Rc<dyn AnalysisClient>,
    in_flight: Option<AnalysisTask>,
    // Set by Clear; the outcome of the in-flight request is dropped on arrival
    discard_outcome: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("strokes", &self.surface.strokes().len())
            .field("in_flight", &self.in_flight.is_some())
            .field("discard_outcome", &self.discard_outcome)
            .finish()
    }
}

impl Session {
    pub fn new(client: Rc<dyn AnalysisClient>) -> Self {
        Self {
            state: UiState::default(),
            surface: DrawingSurface::new(),
            client,
            in_flight: None,
            discard_outcome: false,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    /// True while a request is outstanding, even one whose result was cleared away
    pub fn is_busy(&self) -> bool {
        self.state.is_busy() || self.in_flight.is_some()
    }

    /// Applies a pure toolbar transition
    pub fn update(&mut self, transition: impl FnOnce(&UiState) -> UiState) {
        self.state = transition(&self.state);
    }

    pub fn resize_canvas(&mut self, size: Vec2) {
        self.surface.resize(size);
    }

    pub fn begin_stroke(&mut self, pos: Pos2) {
        self.surface.begin_stroke(pos, &self.state.brush);
    }

    pub fn extend_stroke(&mut self, pos: Pos2) {
        self.surface.extend_stroke(pos);
    }

    pub fn end_stroke(&mut self) {
        self.surface.end_stroke();
    }

    pub fn undo(&mut self) {
        if self.surface.undo().is_none() {
            log::debug!("Nothing to undo");
        }
    }

    /// Wipes the canvas and the result. A pending response is discarded when it
    /// arrives, and the session stays busy until then.
    pub fn clear(&mut self) {
        if self.in_flight.is_some() && !self.discard_outcome {
            log::warn!("Canvas cleared while an analysis was pending; its response will be ignored");
            self.discard_outcome = true;
        }
        self.surface.clear();
        self.state = self.state.clear();
    }

    /// Starts an analysis of the current canvas.
    ///
    /// Returns the driver future to spawn, or `None` if a request is still
    /// outstanding. Capture failures travel through the driver like any other error.
    pub fn start_analysis(&mut self, on_done: impl FnOnce() + Send + 'static) -> Option<BoxedFuture<()>> {
        if self.in_flight.is_some() {
            log::warn!("Ignoring Analyze: a previous request has not settled yet");
            return None;
        }
        let pending = match self.state.begin_analysis() {
            Ok(pending) => pending,
            Err(err) => {
                log::warn!("Ignoring Analyze: {}", err);
                return None;
            }
        };
        self.state = pending;

        let request = analysis::analyze(&*self.client, &self.surface);
        let (task, driver) = AnalysisTask::new(request, on_done);
        self.in_flight = Some(task);
        Some(driver)
    }

    /// Moves a settled request into the UI state. Call once per frame.
    pub fn poll_analysis(&mut self) {
        let Some(task) = &mut self.in_flight else {
            return;
        };
        if let TaskPoll::Ready(outcome) = task.poll() {
            self.in_flight = None;
            if std::mem::take(&mut self.discard_outcome) {
                log::info!("Dropped the response of a cleared analysis");
            } else {
                self.finish(outcome);
            }
        }
    }

    fn finish(&mut self, outcome: AnalysisResult<String>) {
        if let Err(err) = &outcome {
            log::error!("Analysis error: {}", err);
        }
        match self.state.finish_analysis(outcome) {
            Ok(next) => self.state = next,
            Err(err) => log::warn!("Discarding analysis outcome: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{boxed, ImagePayload};
    use crate::error::AnalysisError;
    use crate::state::AnalysisStatus;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct Echo;

    impl AnalysisClient for Echo {
        fn analyze(&self, image: ImagePayload) -> BoxedFuture<AnalysisResult<String>> {
            let len = image.data().len();
            boxed(async move { Ok::<_, AnalysisError>(format!("{} bytes", len)) })
        }
    }

    // Holds its first request open until the test releases it
    struct Gated {
        gate: RefCell<Option<oneshot::Receiver<String>>>,
        calls: Cell<usize>,
    }

    impl AnalysisClient for Gated {
        fn analyze(&self, _image: ImagePayload) -> BoxedFuture<AnalysisResult<String>> {
            self.calls.set(self.calls.get() + 1);
            let gate = self.gate.borrow_mut().take();
            boxed(async move {
                match gate {
                    Some(gate) => gate
                        .await
                        .map_err(|_| AnalysisError::AnalysisFailed("gate dropped".to_owned())),
                    None => Ok("second".to_owned()),
                }
            })
        }
    }

    fn laid_out() -> Session {
        let mut session = Session::new(Rc::new(Echo));
        session.resize_canvas(Vec2::new(64.0, 48.0));
        session
    }

    #[test]
    fn test_second_start_is_ignored_while_pending() {
        let mut session = laid_out();
        let driver = session.start_analysis(|| {});
        assert!(driver.is_some());
        assert!(session.start_analysis(|| {}).is_none());
        assert!(session.is_busy());
    }

    #[test]
    fn test_result_arrives_on_poll() {
        let mut session = laid_out();
        let driver = session.start_analysis(|| {}).unwrap();
        session.poll_analysis();
        assert!(session.is_busy());

        block_on(driver);
        session.poll_analysis();
        assert!(!session.is_busy());
        assert!(matches!(session.state().analysis, AnalysisStatus::Success(_)));
    }

    #[test]
    fn test_capture_failure_is_reported() {
        let mut session = Session::new(Rc::new(Echo));
        let driver = session.start_analysis(|| {}).unwrap();
        block_on(driver);
        session.poll_analysis();
        assert_eq!(
            session.state().analysis.error_message(),
            Some(AnalysisError::NotInitialized.to_string().as_str())
        );
    }

    #[test]
    fn test_clear_discards_pending_response() {
        let mut session = laid_out();
        let driver = session.start_analysis(|| {}).unwrap();
        session.clear();
        block_on(driver);
        session.poll_analysis();
        assert_eq!(session.state().analysis, AnalysisStatus::Idle);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_clear_keeps_session_busy_until_request_settles() {
        let (release, gate) = oneshot::channel();
        let client = Rc::new(Gated {
            gate: RefCell::new(Some(gate)),
            calls: Cell::new(0),
        });
        let mut session = Session::new(client.clone());
        session.resize_canvas(Vec2::new(64.0, 48.0));

        let first = session.start_analysis(|| {}).unwrap();
        session.clear();
        assert_eq!(session.state().analysis, AnalysisStatus::Idle);
        assert!(session.is_busy());

        assert!(session.start_analysis(|| {}).is_none());
        session.poll_analysis();
        assert!(session.start_analysis(|| {}).is_none());
        assert_eq!(client.calls.get(), 1);

        release.send("late".to_owned()).unwrap();
        block_on(first);
        session.poll_analysis();
        assert_eq!(session.state().analysis, AnalysisStatus::Idle);
        assert!(!session.is_busy());

        let second = session.start_analysis(|| {}).unwrap();
        block_on(second);
        session.poll_analysis();
        assert_eq!(session.state().analysis.success_text(), Some("second"));
        assert_eq!(client.calls.get(), 2);
    }
}
