//! Camera acquisition and frame capture
//!
//! The workflow owns at most one live stream at a time; streams are released
//! explicitly and again on drop. Acquisition is two-tier: the preferred
//! ("environment"-facing) device first, then any available device. Rear
//! cameras photograph the animal better but must not block use on devices
//! without one.

#[cfg(all(feature = "camera", target_os = "linux"))]
pub mod gst;
pub mod mock;

use crate::config::Config;
use crate::error::{Error, Result};

/// Which camera to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// The configured outward-facing device
    Environment,
    /// Any available device
    Any,
}

/// Source of camera streams
pub trait CameraBackend {
    type Stream: CameraStream;

    fn acquire(&mut self, facing: Facing) -> Result<Self::Stream>;
}

/// A live camera stream
pub trait CameraStream {
    /// Take one still frame, encoded as JPEG.
    fn capture_jpeg(&mut self) -> Result<Vec<u8>>;

    /// Release the underlying device. Idempotent.
    fn stop(&mut self);

    /// Whether the stream still holds the device.
    fn is_active(&self) -> bool;
}

/// Ordered two-tier acquisition: preferred device, then any device.
///
/// When both tiers fail the second error is returned; it selects the user
/// message.
pub fn acquire_with_fallback<B: CameraBackend>(backend: &mut B) -> Result<B::Stream> {
    match backend.acquire(Facing::Environment) {
        Ok(stream) => Ok(stream),
        Err(first) => {
            tracing::warn!(error = %first, "preferred camera unavailable, trying any device");
            backend.acquire(Facing::Any)
        }
    }
}

/// Backend for builds without camera support: every acquisition reports that
/// no capture device is present, which routes the UI to the file-pick path.
pub struct NoCamera;

impl NoCamera {
    pub fn from_config(_config: &Config) -> Self {
        NoCamera
    }
}

/// Stream type for `NoCamera`; never constructed.
pub struct NoCameraStream;

impl CameraStream for NoCameraStream {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>> {
        Err(Error::NoCameraFound)
    }

    fn stop(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}

impl CameraBackend for NoCamera {
    type Stream = NoCameraStream;

    fn acquire(&mut self, _facing: Facing) -> Result<NoCameraStream> {
        Err(Error::NoCameraFound)
    }
}

#[cfg(all(feature = "camera", target_os = "linux"))]
pub type DefaultCamera = gst::GstCamera;
#[cfg(not(all(feature = "camera", target_os = "linux")))]
pub type DefaultCamera = NoCamera;
