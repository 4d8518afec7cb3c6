//! GStreamer camera backend (Linux, `camera` feature)
//!
//! One pipeline per stream: `v4l2src ! videoconvert ! jpegenc ! appsink`.
//! The preferred tier opens the configured device node; the fallback tier
//! scans for the first openable `/dev/video*`. Failure classification comes
//! from probing the node with a plain open, not from pipeline error strings.

use super::{CameraBackend, CameraStream, Facing};
use crate::config::Config;
use crate::error::{Error, Result};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use std::path::Path;

const CAPTURE_TIMEOUT_SECS: u64 = 5;
const DEVICE_SCAN_RANGE: std::ops::Range<u32> = 0..10;

pub struct GstCamera {
    preferred_device: Option<String>,
}

impl GstCamera {
    pub fn from_config(config: &Config) -> Self {
        Self {
            preferred_device: config.camera_device.clone(),
        }
    }
}

pub struct GstStream {
    pipeline: gst::Pipeline,
    sink: gst_app::AppSink,
    active: bool,
}

impl CameraBackend for GstCamera {
    type Stream = GstStream;

    fn acquire(&mut self, facing: Facing) -> Result<GstStream> {
        gst::init().map_err(|e| Error::CameraUnavailable(format!("gstreamer init: {}", e)))?;

        let device = match facing {
            Facing::Environment => {
                let device = self.preferred_device.clone().ok_or_else(|| {
                    Error::CameraUnavailable("no preferred camera device configured".to_string())
                })?;
                probe_device(&device)?;
                device
            }
            Facing::Any => scan_any_device()?,
        };

        tracing::info!(%device, ?facing, "acquiring camera stream");
        open_stream(&device)
    }
}

impl CameraStream for GstStream {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>> {
        if !self.active {
            return Err(Error::CameraUnavailable("stream already stopped".to_string()));
        }

        let sample = self
            .sink
            .try_pull_sample(gst::ClockTime::from_seconds(CAPTURE_TIMEOUT_SECS))
            .ok_or_else(|| Error::CameraUnavailable("no frame within timeout".to_string()))?;

        let buffer = sample
            .buffer()
            .ok_or_else(|| Error::CameraUnavailable("sample carried no buffer".to_string()))?;
        let map = buffer
            .map_readable()
            .map_err(|_| Error::CameraUnavailable("unreadable frame buffer".to_string()))?;

        Ok(map.as_slice().to_vec())
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.pipeline.set_state(gst::State::Null) {
                tracing::warn!(error = %e, "failed to release camera pipeline");
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for GstStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_stream(device: &str) -> Result<GstStream> {
    let pipeline_desc = format!(
        "v4l2src device={} ! videoconvert ! jpegenc quality=85 ! \
         appsink name=sink max-buffers=1 drop=true sync=false",
        device
    );

    let pipeline = gst::parse::launch(&pipeline_desc)
        .map_err(|e| Error::CameraUnavailable(format!("pipeline: {}", e)))?
        .downcast::<gst::Pipeline>()
        .map_err(|_| Error::CameraUnavailable("not a pipeline".to_string()))?;

    let sink = pipeline
        .by_name("sink")
        .ok_or_else(|| Error::CameraUnavailable("appsink missing".to_string()))?
        .downcast::<gst_app::AppSink>()
        .map_err(|_| Error::CameraUnavailable("appsink has wrong type".to_string()))?;

    pipeline
        .set_state(gst::State::Playing)
        .map_err(|e| Error::CameraUnavailable(format!("start: {}", e)))?;

    Ok(GstStream {
        pipeline,
        sink,
        active: true,
    })
}

/// Classify device-node access into the acquisition failure taxonomy.
fn probe_device(device: &str) -> Result<()> {
    match std::fs::OpenOptions::new().read(true).open(device) {
        Ok(_) => Ok(()),
        Err(e) => Err(match e.kind() {
            std::io::ErrorKind::NotFound => Error::NoCameraFound,
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied,
            _ => Error::CameraUnavailable(e.to_string()),
        }),
    }
}

/// Find the first usable capture device.
///
/// No node present at all is `NoCameraFound`; nodes present but unopenable
/// keep the most specific error seen (permission beats generic failure).
fn scan_any_device() -> Result<String> {
    let mut last_err: Option<Error> = None;

    for index in DEVICE_SCAN_RANGE {
        let device = format!("/dev/video{}", index);
        if !Path::new(&device).exists() {
            continue;
        }
        match probe_device(&device) {
            Ok(()) => return Ok(device),
            Err(e) => {
                let keep = matches!(e, Error::PermissionDenied)
                    || !matches!(last_err, Some(Error::PermissionDenied));
                if keep {
                    last_err = Some(e);
                }
            }
        }
    }

    Err(last_err.unwrap_or(Error::NoCameraFound))
}
