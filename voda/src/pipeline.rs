// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Pipeline descriptions and the glue between GStreamer and the transport.
//!
//! The capture side parses one of the publish descriptions and hands every
//! encoded sample leaving its `appsink` to a [`FramePublisher`]. The playback
//! side pushes received frames into the `appsrc` of [`PLAYBACK`]. [`run`]
//! drives a pipeline until end-of-stream or the first bus error.

use gstreamer as gst;
use gstreamer_app as gst_app;

use gst::prelude::*;

use crate::{BusError, Error, FramePublisher, Result};

/// Camera capture for devices with an Android camera.
///
/// Frames are teed into a local `glimagesink` preview and an H.264 encoder
/// feeding the `appsink` the publisher drains. Both branches drop frames
/// under load (`leaky=2`) so a stalled consumer never backs up the camera.
pub const CAMERA_PUBLISH: &str = "ahcsrc ! video/x-raw,format=NV21,framerate=[1/1,25/1],width=[1,1280],height=[1,720] ! tee name=t ! queue leaky=2 ! glimagesink t. ! queue leaky=2 ! videoconvert ! openh264enc complexity=0 ! appsink name=appsink";

/// Capture from the default system video source, with a preview window.
///
/// Same shape as [`CAMERA_PUBLISH`] but built from elements available on a
/// desktop: `autovideosrc` for capture and `autovideosink` for the preview.
pub const DESKTOP_PUBLISH: &str = r#"autovideosrc ! video/x-raw,framerate=[1/1,25/1],width=[1,1280],height=[1,720] ! tee name=t ! queue leaky=2 ! videoconvert ! openh264enc complexity=0 ! appsink name=appsink  t. ! queue leaky=2 ! taginject tags="title=Publisher" ! autovideosink"#;

/// Playback of received frames through an `appsrc`.
pub const PLAYBACK: &str = r#"appsrc name=appsrc ! video/x-raw,format=RGB,width=160,height=90,framerate=10/1 ! videoconvert ! taginject tags="title=Subscriber" ! autovideosink"#;

/// Initializes GStreamer.
///
/// Must be called before any pipeline is launched. Calling it again after a
/// successful initialization is a no-op.
///
/// # Errors
///
/// Returns [`Error::Glib`] if the underlying GStreamer libraries cannot be
/// initialized.
pub fn init() -> Result<()> {
    gst::init()?;
    Ok(())
}

/// Parses a textual pipeline description into a [`gst::Pipeline`].
///
/// # Arguments
///
/// * `description` - A `gst-launch` style description, e.g. one of
///   [`CAMERA_PUBLISH`], [`DESKTOP_PUBLISH`] or [`PLAYBACK`]
///
/// # Errors
///
/// Returns [`Error::Glib`] if the description does not parse, typically
/// because an element is not installed, or [`Error::Other`] if it parses to
/// something that is not a pipeline.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> Result<(), voda::Error> {
/// voda::init()?;
/// let pipeline = voda::pipeline::launch(voda::pipeline::PLAYBACK)?;
/// # Ok(())
/// # }
/// ```
pub fn launch(description: &str) -> Result<gst::Pipeline> {
    let pipeline_element = gst::parse::launch(description)?;
    pipeline_element
        .dynamic_cast::<gst::Pipeline>()
        .map_err(|_| Error::Other("Parsed description is not a pipeline".to_string()))
}

/// Connects a publisher to the `appsink` of a capture pipeline.
///
/// Every encoded sample the pipeline delivers is published as one frame.
/// Per-sample hiccups (an unpullable sample, an unmappable buffer) are
/// logged and skipped; a failed publish stops the stream by returning an
/// error to the pipeline, which reports it on the bus.
///
/// # Arguments
///
/// * `pipeline` - A pipeline containing an `appsink` named `appsink`
/// * `publisher` - The endpoint frames are published through
///
/// # Errors
///
/// Returns [`Error::Other`] if the pipeline has no `appsink` element.
pub fn publish_from_appsink(pipeline: &gst::Pipeline, mut publisher: FramePublisher) -> Result<()> {
    let sink = pipeline
        .by_name("appsink")
        .ok_or_else(|| Error::Other("Pipeline has no element named \"appsink\"".to_string()))?;
    let appsink = sink
        .dynamic_cast::<gst_app::AppSink>()
        .map_err(|_| Error::Other("Element \"appsink\" is not an appsink".to_string()))?;

    appsink.set_callbacks(
        gst_app::AppSinkCallbacks::builder()
            .new_sample(move |appsink| handle_sample(appsink, &mut publisher))
            .build(),
    );

    Ok(())
}

fn handle_sample(
    appsink: &gst_app::AppSink,
    publisher: &mut FramePublisher,
) -> core::result::Result<gst::FlowSuccess, gst::FlowError> {
    let sample = match appsink.pull_sample() {
        Ok(sample) => sample,
        Err(e) => {
            tracing::warn!("pull_sample failed: {:?}", e);
            return Ok(gst::FlowSuccess::Ok);
        }
    };

    let Some(buffer) = sample.buffer() else {
        return Ok(gst::FlowSuccess::Ok);
    };

    let map = match buffer.map_readable() {
        Ok(map) => map,
        Err(_) => {
            tracing::trace!("skipped frame: buffer not mappable");
            return Ok(gst::FlowSuccess::Ok);
        }
    };

    match publisher.publish(map.as_slice().to_vec()) {
        Ok(frame_num) => {
            tracing::trace!("published frame {}", frame_num);
            Ok(gst::FlowSuccess::Ok)
        }
        Err(e) => {
            tracing::error!("failed to publish frame: {}", e);
            Err(gst::FlowError::Error)
        }
    }
}

/// Returns the `appsrc` of a playback pipeline.
///
/// # Arguments
///
/// * `pipeline` - A pipeline containing an `appsrc` named `appsrc`, e.g.
///   one launched from [`PLAYBACK`]
///
/// # Errors
///
/// Returns [`Error::Other`] if the pipeline has no `appsrc` element.
pub fn playback_appsrc(pipeline: &gst::Pipeline) -> Result<gst_app::AppSrc> {
    let src = pipeline
        .by_name("appsrc")
        .ok_or_else(|| Error::Other("Pipeline has no element named \"appsrc\"".to_string()))?;
    src.dynamic_cast::<gst_app::AppSrc>()
        .map_err(|_| Error::Other("Element \"appsrc\" is not an appsrc".to_string()))
}

/// Pushes one received frame into a playback pipeline.
///
/// # Arguments
///
/// * `appsrc` - The source element of the playback pipeline
/// * `frame` - The frame data to hand over
///
/// # Errors
///
/// Returns [`Error::Other`] if the buffer cannot be allocated or the
/// `appsrc` refuses it, e.g. while the pipeline is flushing on shutdown.
pub fn push_frame(appsrc: &gst_app::AppSrc, frame: &[u8]) -> Result<()> {
    let mut buffer = gst::Buffer::with_size(frame.len())
        .map_err(|_| Error::Other(format!("Failed to allocate a {} byte buffer", frame.len())))?;
    {
        let buffer_ref = buffer
            .get_mut()
            .ok_or_else(|| Error::Other("Freshly allocated buffer is shared".to_string()))?;
        let mut map = buffer_ref
            .map_writable()
            .map_err(|_| Error::Other("Buffer is not writable".to_string()))?;
        map.copy_from_slice(frame);
    }

    appsrc
        .push_buffer(buffer)
        .map_err(|e| Error::Other(format!("appsrc refused buffer: {:?}", e)))?;
    Ok(())
}

/// Drives a pipeline until end-of-stream or the first error.
///
/// The pipeline is set to `Playing`, its bus is drained on the calling
/// thread, and it is reset to `Null` before this returns, on the error path
/// as well.
///
/// # Arguments
///
/// * `pipeline` - The pipeline to run
///
/// # Errors
///
/// Returns [`Error::Bus`] when an element posts an error message, or
/// [`Error::StateChange`] when the pipeline refuses to start or stop.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> Result<(), voda::Error> {
/// voda::init()?;
/// let pipeline = voda::pipeline::launch(voda::pipeline::PLAYBACK)?;
/// voda::pipeline::run(&pipeline)?;
/// # Ok(())
/// # }
/// ```
pub fn run(pipeline: &gst::Pipeline) -> Result<()> {
    pipeline.set_state(gst::State::Playing)?;

    let bus = pipeline
        .bus()
        .ok_or_else(|| Error::Other("Pipeline has no bus".to_string()))?;

    for msg in bus.iter_timed(gst::ClockTime::NONE) {
        match msg.view() {
            gst::MessageView::Eos(..) => break,
            gst::MessageView::Error(err) => {
                pipeline.set_state(gst::State::Null)?;
                return Err(BusError {
                    src: msg
                        .src()
                        .map(|s| String::from(s.path_string()))
                        .unwrap_or_else(|| String::from("None")),
                    source: err.error(),
                    debug: err.debug().map(|s| s.to_string()),
                }
                .into());
            }
            _ => (),
        }
    }
    pipeline.set_state(gst::State::Null)?;

    Ok(())
}
