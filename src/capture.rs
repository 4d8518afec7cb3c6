//! Photo capture workflow
//!
//! The one stateful piece of the system: camera acquisition with fallback,
//! single-frame capture, remote analysis, and outcome display, with the
//! camera stream owned exclusively by the workflow instance.
//!
//! The workflow is generic over the camera seam so the whole state machine
//! runs under tests against the mock backend. Analysis is split into
//! `begin_analysis` / `finish_analysis` so callers may run the remote call on
//! a worker thread; an attempt counter guards against a stale completion
//! being applied after a retake.

use crate::camera::{acquire_with_fallback, CameraBackend, CameraStream};
use crate::error::{Error, Result};
use crate::types::{CaptureOutcome, WeightEstimate};
use std::sync::Arc;

/// Workflow state. `Done` is the terminal display state; retake re-enters
/// `CameraStarting`.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    CameraStarting,
    CameraActive,
    FrameCaptured,
    Analyzing,
    Done(CaptureOutcome),
}

/// Handle for one analysis attempt: the frame payload plus the attempt
/// counter to echo back into `finish_analysis`.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub attempt: u64,
    pub frame: Arc<Vec<u8>>,
}

pub struct PhotoWorkflow<B: CameraBackend> {
    backend: B,
    state: CaptureState,
    stream: Option<B::Stream>,
    frame: Option<Arc<Vec<u8>>>,
    attempt: u64,
}

impl<B: CameraBackend> PhotoWorkflow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: CaptureState::Idle,
            stream: None,
            frame: None,
            attempt: 0,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Attempt counter; bumps on every camera (re)start, superseding any
    /// in-flight analysis.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Captured frame payload, if any (for preview rendering).
    pub fn frame(&self) -> Option<Arc<Vec<u8>>> {
        self.frame.clone()
    }

    pub fn is_camera_active(&self) -> bool {
        self.stream.as_ref().is_some_and(|s| s.is_active())
    }

    /// Start (or restart) camera acquisition.
    ///
    /// Discards any captured frame and outcome, releases a previously held
    /// stream, then runs the two-tier acquisition. On failure the workflow
    /// lands in `Done(Error)` with the category message and the error is also
    /// returned for callers that propagate.
    pub fn start_camera(&mut self) -> Result<()> {
        self.attempt += 1;
        self.frame = None;
        self.release_stream();
        self.state = CaptureState::CameraStarting;

        match acquire_with_fallback(&mut self.backend) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = CaptureState::CameraActive;
                Ok(())
            }
            Err(e) => {
                self.state = CaptureState::Done(CaptureOutcome::Error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Take one still frame and release the camera immediately; the stream is
    /// not needed once a frame is held.
    pub fn capture_frame(&mut self) -> Result<()> {
        let Some(mut stream) = self.stream.take() else {
            return Err(Error::CameraUnavailable("no active camera stream".to_string()));
        };

        let captured = stream.capture_jpeg();
        stream.stop();

        match captured {
            Ok(jpeg) => {
                self.frame = Some(Arc::new(jpeg));
                self.state = CaptureState::FrameCaptured;
                Ok(())
            }
            Err(e) => {
                self.state = CaptureState::Done(CaptureOutcome::Error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Load a pre-captured image payload, bypassing the camera.
    ///
    /// Used by the file-pick path; supersedes any in-flight analysis and
    /// releases an active stream.
    pub fn use_frame(&mut self, jpeg: Vec<u8>) {
        self.attempt += 1;
        self.release_stream();
        self.frame = Some(Arc::new(jpeg));
        self.state = CaptureState::FrameCaptured;
    }

    /// Begin an analysis attempt.
    ///
    /// Rejected while another analysis is pending; without a captured frame
    /// the workflow lands in `Done(Error)` with the `NoFrameCaptured`
    /// message.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket> {
        if self.state == CaptureState::Analyzing {
            return Err(Error::AnalysisInProgress);
        }

        let Some(frame) = self.frame.clone() else {
            let e = Error::NoFrameCaptured;
            self.state = CaptureState::Done(CaptureOutcome::Error(e.user_message()));
            return Err(e);
        };

        self.state = CaptureState::Analyzing;
        Ok(AnalysisTicket {
            attempt: self.attempt,
            frame,
        })
    }

    /// Apply an analysis completion.
    ///
    /// A completion whose attempt counter no longer matches (the user retook
    /// or reloaded meanwhile) is discarded; it must not overwrite the current
    /// state.
    pub fn finish_analysis(
        &mut self,
        attempt: u64,
        result: std::result::Result<WeightEstimate, Error>,
    ) {
        if attempt != self.attempt || self.state != CaptureState::Analyzing {
            tracing::debug!(
                stale = attempt,
                current = self.attempt,
                "discarding stale analysis result"
            );
            return;
        }

        self.state = match result {
            Ok(estimate) => CaptureState::Done(CaptureOutcome::Success(estimate)),
            Err(e) => CaptureState::Done(CaptureOutcome::Error(e.user_message())),
        };
    }

    /// Discard the captured frame and any outcome, then restart camera
    /// acquisition from scratch.
    pub fn retake(&mut self) -> Result<()> {
        self.start_camera()
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}

impl<B: CameraBackend> Drop for PhotoWorkflow<B> {
    fn drop(&mut self) {
        // Teardown must release the stream on every exit path.
        self.release_stream();
    }
}
