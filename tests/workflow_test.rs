//! Integration tests for the photo capture workflow
//!
//! Runs the full capture-and-analyze flow against the mock camera backend
//! and the stub estimator; no device or network access.

use caprino_checker::camera::mock::{MockCamera, MockFailure};
use caprino_checker::camera::Facing;
use caprino_checker::capture::{CaptureState, PhotoWorkflow};
use caprino_checker::types::CaptureOutcome;
use caprino_checker::vision::stub::StubEstimator;
use caprino_checker::vision::WeightEstimator;

#[test]
fn test_full_flow_success() {
    let camera = MockCamera::new();
    let handle = camera.handle();
    let mut workflow = PhotoWorkflow::new(camera);
    let estimator = StubEstimator::returning(42.5, "Cabra adulta de porte médio.");

    workflow.start_camera().unwrap();
    workflow.capture_frame().unwrap();

    let ticket = workflow.begin_analysis().unwrap();
    let result = estimator.estimate(&ticket.frame);
    workflow.finish_analysis(ticket.attempt, result);

    match workflow.state() {
        CaptureState::Done(CaptureOutcome::Success(estimate)) => {
            assert_eq!(estimate.estimated_weight_kg, 42.5);
            assert_eq!(estimate.reasoning, "Cabra adulta de porte médio.");
        }
        other => panic!("expected success outcome, got {:?}", other),
    }

    // Camera released at capture time; exactly one estimator call
    assert_eq!(handle.live_streams(), 0);
    assert_eq!(estimator.call_count(), 1);
}

#[test]
fn test_full_flow_malformed_response() {
    let mut workflow = PhotoWorkflow::new(MockCamera::new());
    let estimator = StubEstimator::failing_malformed("reasoning missing");

    workflow.start_camera().unwrap();
    workflow.capture_frame().unwrap();

    let ticket = workflow.begin_analysis().unwrap();
    workflow.finish_analysis(ticket.attempt, estimator.estimate(&ticket.frame));

    match workflow.state() {
        CaptureState::Done(CaptureOutcome::Error(msg)) => {
            // User sees the category message, never the shape detail
            assert!(msg.contains("resposta da IA"));
            assert!(!msg.contains("reasoning missing"));
        }
        other => panic!("expected error outcome, got {:?}", other),
    }
}

#[test]
fn test_transport_failure_then_retry_succeeds() {
    let camera = MockCamera::new();
    let handle = camera.handle();
    let mut workflow = PhotoWorkflow::new(camera);

    workflow.start_camera().unwrap();
    workflow.capture_frame().unwrap();

    let failing = StubEstimator::failing_transport("connection refused");
    let ticket = workflow.begin_analysis().unwrap();
    workflow.finish_analysis(ticket.attempt, failing.estimate(&ticket.frame));
    assert!(matches!(
        workflow.state(),
        CaptureState::Done(CaptureOutcome::Error(_))
    ));

    // The failure is non-fatal: retake and go again
    workflow.retake().unwrap();
    workflow.capture_frame().unwrap();

    let working = StubEstimator::returning(39.0, "ok");
    let ticket = workflow.begin_analysis().unwrap();
    workflow.finish_analysis(ticket.attempt, working.estimate(&ticket.frame));

    assert!(matches!(
        workflow.state(),
        CaptureState::Done(CaptureOutcome::Success(_))
    ));
    assert_eq!(handle.live_streams(), 0);
}

#[test]
fn test_stale_completion_after_retake_not_applied() {
    let mut workflow = PhotoWorkflow::new(MockCamera::new());
    let estimator = StubEstimator::returning(77.0, "stale");

    workflow.start_camera().unwrap();
    workflow.capture_frame().unwrap();
    let stale_ticket = workflow.begin_analysis().unwrap();

    // Retake before the (slow) analysis settles
    workflow.retake().unwrap();
    workflow.capture_frame().unwrap();

    // The stale completion arrives now and must be discarded
    workflow.finish_analysis(stale_ticket.attempt, estimator.estimate(&stale_ticket.frame));
    assert_eq!(*workflow.state(), CaptureState::FrameCaptured);

    // The current attempt still runs to completion normally
    let fresh = StubEstimator::returning(41.0, "fresh");
    let ticket = workflow.begin_analysis().unwrap();
    workflow.finish_analysis(ticket.attempt, fresh.estimate(&ticket.frame));
    match workflow.state() {
        CaptureState::Done(CaptureOutcome::Success(estimate)) => {
            assert_eq!(estimate.estimated_weight_kg, 41.0);
        }
        other => panic!("expected fresh success, got {:?}", other),
    }
}

#[test]
fn test_camera_denied_everywhere_surfaces_permission_message() {
    let camera = MockCamera::new();
    let handle = camera.handle();
    handle.fail_facing(Facing::Environment, MockFailure::PermissionDenied);
    handle.fail_facing(Facing::Any, MockFailure::PermissionDenied);

    let mut workflow = PhotoWorkflow::new(camera);
    assert!(workflow.start_camera().is_err());

    match workflow.state() {
        CaptureState::Done(CaptureOutcome::Error(msg)) => {
            assert!(msg.contains("permissão"));
        }
        other => panic!("expected Done(Error), got {:?}", other),
    }

    // Recoverable: permission granted on retry
    handle.clear_failures();
    workflow.retake().unwrap();
    assert_eq!(*workflow.state(), CaptureState::CameraActive);
}

#[test]
fn test_file_loaded_frame_analyzes_without_camera() {
    use caprino_checker::camera::NoCamera;
    use caprino_checker::config::Config;

    let mut workflow = PhotoWorkflow::new(NoCamera::from_config(&Config::default()));
    assert!(workflow.start_camera().is_err());

    // File-pick path: a pre-captured payload enters the workflow directly
    workflow.use_frame(caprino_checker::camera::mock::make_test_jpeg());
    assert_eq!(*workflow.state(), CaptureState::FrameCaptured);

    let estimator = StubEstimator::returning(35.5, "via arquivo");
    let ticket = workflow.begin_analysis().unwrap();
    workflow.finish_analysis(ticket.attempt, estimator.estimate(&ticket.frame));

    assert!(matches!(
        workflow.state(),
        CaptureState::Done(CaptureOutcome::Success(_))
    ));
}
