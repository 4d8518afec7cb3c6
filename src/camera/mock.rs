//! Mock camera backend for tests
//!
//! Records every acquisition and stream-stop call through a shared handle so
//! tests can keep observing after the backend moves into a workflow.

use super::{CameraBackend, CameraStream, Facing};
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex};

/// Scripted acquisition failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    PermissionDenied,
    NoCameraFound,
    Unavailable,
}

impl MockFailure {
    fn to_error(self) -> Error {
        match self {
            MockFailure::PermissionDenied => Error::PermissionDenied,
            MockFailure::NoCameraFound => Error::NoCameraFound,
            MockFailure::Unavailable => Error::CameraUnavailable("mock failure".to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    acquisitions: Vec<Facing>,
    stop_calls: usize,
    live_streams: usize,
    env_failure: Option<MockFailure>,
    any_failure: Option<MockFailure>,
}

/// Observation/scripting handle; stays valid after the backend is moved.
#[derive(Debug, Clone, Default)]
pub struct MockHandle(Arc<Mutex<Shared>>);

impl MockHandle {
    pub fn acquisitions(&self) -> Vec<Facing> {
        self.0.lock().unwrap().acquisitions.clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.0.lock().unwrap().stop_calls
    }

    pub fn live_streams(&self) -> usize {
        self.0.lock().unwrap().live_streams
    }

    pub fn fail_facing(&self, facing: Facing, failure: MockFailure) {
        let mut shared = self.0.lock().unwrap();
        match facing {
            Facing::Environment => shared.env_failure = Some(failure),
            Facing::Any => shared.any_failure = Some(failure),
        }
    }

    pub fn clear_failures(&self) {
        let mut shared = self.0.lock().unwrap();
        shared.env_failure = None;
        shared.any_failure = None;
    }
}

/// Camera backend double
#[derive(Default)]
pub struct MockCamera {
    shared: MockHandle,
}

impl MockCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> MockHandle {
        self.shared.clone()
    }

    pub fn fail_facing(&mut self, facing: Facing, failure: MockFailure) {
        self.shared.fail_facing(facing, failure);
    }

    pub fn acquisitions(&self) -> Vec<Facing> {
        self.shared.acquisitions()
    }
}

/// Stream double; capture returns a real (tiny) JPEG payload.
#[derive(Debug)]
pub struct MockStream {
    active: bool,
    shared: MockHandle,
}

impl CameraBackend for MockCamera {
    type Stream = MockStream;

    fn acquire(&mut self, facing: Facing) -> Result<MockStream> {
        let mut shared = self.shared.0.lock().unwrap();
        shared.acquisitions.push(facing);

        let failure = match facing {
            Facing::Environment => shared.env_failure,
            Facing::Any => shared.any_failure,
        };
        if let Some(failure) = failure {
            return Err(failure.to_error());
        }

        shared.live_streams += 1;
        Ok(MockStream {
            active: true,
            shared: self.shared.clone(),
        })
    }
}

impl CameraStream for MockStream {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>> {
        if !self.active {
            return Err(Error::CameraUnavailable("stream already stopped".to_string()));
        }
        Ok(make_test_jpeg())
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            let mut shared = self.shared.0.lock().unwrap();
            shared.stop_calls += 1;
            shared.live_streams -= 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A valid 8x8 JPEG, so downstream mime detection sees real image bytes.
pub fn make_test_jpeg() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([120, 100, 80]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg)
        .expect("in-memory JPEG encode");
    buf.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_idempotent() {
        let mut camera = MockCamera::new();
        let handle = camera.handle();
        let mut stream = camera.acquire(Facing::Any).unwrap();

        stream.stop();
        stream.stop();
        assert_eq!(handle.stop_calls(), 1);
        assert_eq!(handle.live_streams(), 0);
    }

    #[test]
    fn test_drop_releases_stream() {
        let mut camera = MockCamera::new();
        let handle = camera.handle();
        {
            let _stream = camera.acquire(Facing::Any).unwrap();
            assert_eq!(handle.live_streams(), 1);
        }
        assert_eq!(handle.live_streams(), 0);
        assert_eq!(handle.stop_calls(), 1);
    }

    #[test]
    fn test_capture_after_stop_fails() {
        let mut camera = MockCamera::new();
        let mut stream = camera.acquire(Facing::Any).unwrap();
        stream.stop();
        assert!(stream.capture_jpeg().is_err());
    }

    #[test]
    fn test_test_jpeg_is_recognizable() {
        let jpeg = make_test_jpeg();
        assert_eq!(
            image::guess_format(&jpeg).unwrap(),
            image::ImageFormat::Jpeg
        );
    }
}
