// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide streaming state shared between the JNI entry points.
//!
//! The Java activity drives this module from two independent directions: the
//! surface lifecycle callbacks bind and release the render window, and the
//! run callback starts the camera publish pipeline. Both sides go through a
//! single lock so a surface bound before the pipeline exists is attached as
//! soon as the pipeline is created, and vice versa.

use std::sync::{LazyLock, Mutex};

use gstreamer as gst;
use gst::prelude::*;
use gstreamer_video as gst_video;
use gst_video::prelude::*;

use voda::config::StreamConfig;
use voda::{Session, pipeline};

use crate::surface::{BindOutcome, NativeWindow, SurfaceBinding};

pub(crate) static CAT: LazyLock<gst::DebugCategory> = LazyLock::new(|| {
    gst::DebugCategory::new(
        "voda",
        gst::DebugColorFlags::empty(),
        Some("VoDA camera publisher"),
    )
});

struct RuntimeState {
    pipeline: Option<gst::Pipeline>,
    surface: SurfaceBinding,
}

static STATE: LazyLock<Mutex<RuntimeState>> = LazyLock::new(|| {
    Mutex::new(RuntimeState {
        pipeline: None,
        surface: SurfaceBinding::default(),
    })
});

/// Outcome of a [`start`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The pipeline was created and is now streaming.
    Started,
    /// A previous pipeline is still streaming; nothing was created.
    AlreadyRunning,
}

/// Starts capturing from the camera and publishing over DDS.
///
/// The pipeline runs on a background thread until end-of-stream or an error,
/// after which [`start`] can be called again. If a surface is already bound
/// it is attached to the video overlay before the pipeline starts.
///
/// A failed start leaves the runtime stopped, so the call can simply be
/// retried.
pub fn start(config: &StreamConfig) -> voda::Result<StartOutcome> {
    start_pipeline(config, pipeline::CAMERA_PUBLISH)
}

/// Launches `description` and publishes its `appsink` output over DDS.
fn start_pipeline(config: &StreamConfig, description: &str) -> voda::Result<StartOutcome> {
    let mut state = STATE
        .lock()
        .map_err(|e| voda::Error::Other(format!("Failed to get runtime mutex: {}", e)))?;
    if state.pipeline.is_some() {
        gst::debug!(CAT, "start requested while already streaming");
        return Ok(StartOutcome::AlreadyRunning);
    }

    let pipeline = pipeline::launch(description)?;
    let session = Session::connect(config)?;
    pipeline::publish_from_appsink(&pipeline, session.publisher()?)?;

    if let Some(handle) = state.surface.handle() {
        attach_overlay(&pipeline, handle)?;
    }

    state.pipeline = Some(pipeline.clone());
    drop(state);

    std::thread::spawn(move || {
        gst::info!(CAT, "streaming started");
        match pipeline::run(&pipeline) {
            Ok(()) => gst::info!(CAT, "streaming finished"),
            Err(e) => gst::error!(CAT, "streaming failed: {}", e),
        }
        if let Ok(mut state) = STATE.lock() {
            state.pipeline = None;
        }
    });

    Ok(StartOutcome::Started)
}

/// Whether a pipeline is currently streaming.
pub fn is_running() -> bool {
    match STATE.lock() {
        Ok(state) => state.pipeline.is_some(),
        Err(_) => false,
    }
}

/// Binds `window` as the render target for the camera preview.
///
/// The previously bound window, if any, is released. When the pipeline is
/// already streaming the overlay is repointed immediately; otherwise the
/// window is kept until [`start`] creates one.
pub fn bind_surface(window: NativeWindow) -> voda::Result<BindOutcome> {
    let mut state = STATE
        .lock()
        .map_err(|e| voda::Error::Other(format!("Failed to get runtime mutex: {}", e)))?;
    let outcome = state.surface.bind(window);
    gst::debug!(CAT, "surface bind: {:?}", outcome);

    if let Some(handle) = state.surface.handle() {
        if let Some(pipeline) = state.pipeline.as_ref() {
            attach_overlay(pipeline, handle)?;
        }
    }
    Ok(outcome)
}

/// Detaches the overlay from the bound window and releases the window.
///
/// Safe to call when nothing is bound. The pipeline keeps streaming without
/// a preview until a new surface is bound.
pub fn release_surface() {
    let Ok(mut state) = STATE.lock() else {
        return;
    };
    if let Some(pipeline) = state.pipeline.as_ref() {
        detach_overlay(pipeline);
    }
    if state.surface.unbind() {
        gst::debug!(CAT, "surface released");
    }
}

/// The handle of the currently bound window, or 0 when none is bound.
pub fn surface_handle() -> usize {
    match STATE.lock() {
        Ok(state) => state.surface.handle().unwrap_or(0),
        Err(_) => 0,
    }
}

fn attach_overlay(pipeline: &gst::Pipeline, handle: usize) -> voda::Result<()> {
    let overlay = pipeline
        .by_interface(gst_video::VideoOverlay::static_type())
        .ok_or_else(|| voda::Error::Other("Pipeline has no video overlay".to_string()))?
        .dynamic_cast::<gst_video::VideoOverlay>()
        .map_err(|_| voda::Error::Other("Overlay element is not a VideoOverlay".to_string()))?;
    unsafe { overlay.set_window_handle(handle) };
    Ok(())
}

fn detach_overlay(pipeline: &gst::Pipeline) {
    let overlay = pipeline
        .by_interface(gst_video::VideoOverlay::static_type())
        .and_then(|element| element.dynamic_cast::<gst_video::VideoOverlay>().ok());
    if let Some(overlay) = overlay {
        unsafe { overlay.set_window_handle(0) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::c_void;
    use std::ptr::NonNull;

    // The runtime state is process-global, so the tests take turns.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn window(handle: usize) -> NativeWindow {
        let ptr = NonNull::new(handle as *mut c_void).unwrap();
        unsafe { NativeWindow::from_raw(ptr) }
    }

    #[test]
    fn surface_binding_is_tracked_without_a_pipeline() {
        let _guard = TEST_LOCK.lock().unwrap();
        voda::init().unwrap();
        release_surface();

        assert_eq!(surface_handle(), 0);
        assert_eq!(bind_surface(window(0x1000)).unwrap(), BindOutcome::Bound);
        assert_eq!(surface_handle(), 0x1000);
        assert_eq!(bind_surface(window(0x1000)).unwrap(), BindOutcome::Unchanged);
        assert_eq!(bind_surface(window(0x2000)).unwrap(), BindOutcome::Replaced);
        assert_eq!(surface_handle(), 0x2000);

        release_surface();
        assert_eq!(surface_handle(), 0);
    }

    #[test]
    fn failed_start_leaves_the_runtime_stopped() {
        let _guard = TEST_LOCK.lock().unwrap();
        voda::init().unwrap();
        release_surface();

        // The camera capture pipeline needs Android-only elements, so
        // launching it here fails before anything is connected.
        let config = StreamConfig::default();
        assert!(start(&config).is_err());
        assert!(!is_running());
        assert!(start(&config).is_err());
        assert!(!is_running());
    }

    /// Stand-in for the camera description, built from elements available on
    /// a development host and throttled to keep the background thread light.
    const TEST_PUBLISH: &str =
        "videotestsrc is-live=true ! video/x-raw,width=160,height=90,framerate=5/1 ! appsink name=appsink";

    fn stop_streaming() {
        let pipeline = match STATE.lock() {
            Ok(state) => state.pipeline.clone(),
            Err(_) => None,
        };
        if let Some(pipeline) = pipeline {
            assert!(pipeline.send_event(gst::event::Eos::new()));
        }
        for _ in 0..100 {
            if !is_running() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
        panic!("pipeline did not stop after end-of-stream");
    }

    #[test]
    fn second_start_reports_already_running() {
        let _guard = TEST_LOCK.lock().unwrap();
        voda::init().unwrap();
        release_surface();

        let config = StreamConfig {
            domain_id: 350,
            ..StreamConfig::default()
        };
        assert_eq!(
            start_pipeline(&config, TEST_PUBLISH).unwrap(),
            StartOutcome::Started
        );
        assert!(is_running());
        assert_eq!(
            start_pipeline(&config, TEST_PUBLISH).unwrap(),
            StartOutcome::AlreadyRunning
        );
        // The camera entry point answers the same way, without touching the
        // running pipeline.
        assert_eq!(start(&config).unwrap(), StartOutcome::AlreadyRunning);

        stop_streaming();
        assert!(!is_running());
    }
}
