use std::cell::Cell;
use std::rc::Rc;

use egui::{Pos2, Vec2};
use futures::executor::block_on;
use futures::future;
use smart_sketch::analysis::{boxed, AnalysisClient, BoxedFuture, ImagePayload};
use smart_sketch::panels::{ResultView, PLACEHOLDER_TEXT};
use smart_sketch::state::AnalysisStatus;
use smart_sketch::{AnalysisError, AnalysisResult, Session};

// Stub client resolving every request with a canned outcome
struct StubClient {
    outcome: AnalysisResult<String>,
    calls: Cell<usize>,
}

impl StubClient {
    fn new(outcome: AnalysisResult<String>) -> Rc<Self> {
        Rc::new(Self {
            outcome,
            calls: Cell::new(0),
        })
    }
}

impl AnalysisClient for StubClient {
    fn analyze(&self, _image: ImagePayload) -> BoxedFuture<AnalysisResult<String>> {
        self.calls.set(self.calls.get() + 1);
        boxed(future::ready(self.outcome.clone()))
    }
}

fn session_with(client: Rc<StubClient>) -> Session {
    let mut session = Session::new(client);
    session.resize_canvas(Vec2::new(120.0, 80.0));
    session
}

fn panel_text(session: &Session) -> Option<String> {
    ResultView::of(&session.state().analysis).text().map(str::to_owned)
}

#[test]
fn test_success_is_displayed() {
    let client = StubClient::new(Ok("X".to_owned()));
    let mut session = session_with(client.clone());

    let driver = session.start_analysis(|| {}).expect("analysis should start");
    assert_eq!(session.state().analysis, AnalysisStatus::Pending);
    assert!(session.is_busy());

    block_on(driver);
    session.poll_analysis();

    assert_eq!(session.state().analysis, AnalysisStatus::Success("X".to_owned()));
    assert_eq!(panel_text(&session).as_deref(), Some("X"));
    assert_eq!(client.calls.get(), 1);
}

#[test]
fn test_rejection_is_displayed_and_busy_clears() {
    let client = StubClient::new(Err(AnalysisError::AnalysisFailed("timeout".to_owned())));
    let mut session = session_with(client);

    let driver = session.start_analysis(|| {}).unwrap();
    block_on(driver);
    session.poll_analysis();

    let text = panel_text(&session).unwrap();
    assert!(text.contains("timeout"), "{text}");
    assert!(matches!(ResultView::of(&session.state().analysis), ResultView::Error(_)));
    assert!(!session.is_busy());

    // The same button works again
    assert!(session.start_analysis(|| {}).is_some());
}

#[test]
fn test_busy_flag_blocks_second_request() {
    let client = StubClient::new(Ok("once".to_owned()));
    let mut session = session_with(client.clone());

    let first = session.start_analysis(|| {}).unwrap();
    assert!(session.start_analysis(|| {}).is_none());
    block_on(first);
    session.poll_analysis();

    assert_eq!(client.calls.get(), 1);
}

#[test]
fn test_empty_canvas_still_analyzes() {
    let client = StubClient::new(Ok("blank".to_owned()));
    let mut session = session_with(client.clone());
    assert!(session.surface().is_empty());

    let driver = session.start_analysis(|| {}).unwrap();
    block_on(driver);
    session.poll_analysis();

    assert_eq!(session.state().analysis.success_text(), Some("blank"));
    assert_eq!(client.calls.get(), 1);
}

#[test]
fn test_unlaid_canvas_reports_not_initialized() {
    let client = StubClient::new(Ok("never".to_owned()));
    let mut session = Session::new(client.clone());

    let driver = session.start_analysis(|| {}).unwrap();
    block_on(driver);
    session.poll_analysis();

    assert_eq!(
        session.state().analysis,
        AnalysisStatus::Failure("Canvas not initialized".to_owned())
    );
    assert_eq!(client.calls.get(), 0);
}

#[test]
fn test_clear_returns_to_idle_after_any_sequence() {
    let outcomes = [
        Ok("done".to_owned()),
        Err(AnalysisError::AnalysisFailed("boom".to_owned())),
    ];

    for outcome in outcomes {
        for strokes in 0..4 {
            for undos in 0..3 {
                let mut session = session_with(StubClient::new(outcome.clone()));
                for i in 0..strokes {
                    let y = 10.0 + i as f32 * 5.0;
                    session.begin_stroke(Pos2::new(5.0, y));
                    session.extend_stroke(Pos2::new(60.0, y));
                    session.end_stroke();
                }
                for _ in 0..undos {
                    session.undo();
                }

                let driver = session.start_analysis(|| {}).unwrap();
                block_on(driver);
                session.poll_analysis();
                assert_ne!(session.state().analysis, AnalysisStatus::Idle);

                session.clear();
                assert_eq!(session.state().analysis, AnalysisStatus::Idle);
                assert!(session.state().analysis.success_text().is_none());
                assert!(session.state().analysis.error_message().is_none());
                assert_eq!(panel_text(&session).as_deref(), Some(PLACEHOLDER_TEXT));
                assert!(session.surface().is_empty());
            }
        }
    }
}
