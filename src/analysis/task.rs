use futures::channel::oneshot;

use super::{boxed, BoxedFuture};
use crate::error::{AnalysisError, AnalysisResult};

/// Outcome of polling an [`AnalysisTask`] once
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll {
    Pending,
    Ready(AnalysisResult<String>),
}

/// UI-side handle of one in-flight request.
///
/// The request runs inside a driver future that reports through a oneshot
/// channel; the UI polls the handle once per frame and never blocks.
#[derive(Debug)]
pub struct AnalysisTask {
    receiver: oneshot::Receiver<AnalysisResult<String>>,
}

impl AnalysisTask {
    /// Wraps `request`, returning the handle and the driver future to spawn.
    ///
    /// `on_done` runs after the outcome is delivered, typically to request a repaint.
    pub fn new(
        request: BoxedFuture<AnalysisResult<String>>,
        on_done: impl FnOnce() + Send + 'static,
    ) -> (Self, BoxedFuture<()>) {
        let (sender, receiver) = oneshot::channel();
        let driver = boxed(async move {
            let outcome = request.await;
            if sender.send(outcome).is_err() {
                log::warn!("Analysis finished after it was discarded; dropping the response");
            }
            on_done();
        });
        (Self { receiver }, driver)
    }

    pub fn poll(&mut self) -> TaskPoll {
        match self.receiver.try_recv() {
            Ok(Some(outcome)) => TaskPoll::Ready(outcome),
            Ok(None) => TaskPoll::Pending,
            Err(oneshot::Canceled) => TaskPoll::Ready(Err(AnalysisError::AnalysisFailed(
                "the request was abandoned before it completed".to_owned(),
            ))),
        }
    }
}

/// Runs driver futures off the UI thread.
#[derive(Debug)]
pub struct Spawner {
    #[cfg(not(target_arch = "wasm32"))]
    runtime: Option<tokio::runtime::Runtime>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("analysis")
            .enable_all()
            .build();
        match runtime {
            Ok(runtime) => Self {
                runtime: Some(runtime),
            },
            Err(err) => {
                log::error!("Failed to start the analysis runtime: {}", err);
                Self { runtime: None }
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {}
    }

    /// Spawns `driver`. If it cannot run, it is dropped and its task resolves
    /// as abandoned.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn(&self, driver: BoxedFuture<()>) {
        match &self.runtime {
            Some(runtime) => {
                runtime.spawn(driver);
            }
            None => log::error!("No analysis runtime available; request abandoned"),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn spawn(&self, driver: BoxedFuture<()>) {
        wasm_bindgen_futures::spawn_local(driver);
    }
}
