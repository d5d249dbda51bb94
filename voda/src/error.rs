// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for VoDA operations.
//!
//! This module defines the error types returned by streaming and transport
//! calls, folding GStreamer, GLib and DDS failures into one enum.

use gstreamer as gst;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// An error message posted on a pipeline bus.
///
/// Carries the path of the element that reported the failure, the underlying
/// GLib error and the optional debug details attached by the element.
#[derive(Debug, thiserror::Error)]
#[error("Error from {src}: {source} (debug: {debug:?})")]
pub struct BusError {
    /// Path of the element that posted the message, or `"None"` when the
    /// message has no source.
    pub src: String,

    /// The underlying GLib error carried by the message.
    #[source]
    pub source: gst::glib::Error,

    /// Additional debug details attached by the element, if any.
    pub debug: Option<String>,
}

/// Errors that can occur when streaming video over DDS.
///
/// This enum folds the failure modes of the two subsystems VoDA glues
/// together: GStreamer pipeline construction and playback on one side, DDS
/// entity creation and publication on the other.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GLib-level failure, e.g. parsing a pipeline description that
    /// references an element not installed on the system.
    #[error("GLib error: {0}")]
    Glib(#[from] gst::glib::Error),

    /// A pipeline refused a requested state transition.
    #[error("State change failed: {0}")]
    StateChange(#[from] gst::StateChangeError),

    /// An element posted an error message on the pipeline bus.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// A DDS entity could not be created or a sample could not be written.
    #[error("DDS error: {0:?}")]
    Dds(dust_dds::infrastructure::error::DdsError),

    /// A generic error for failures not covered by the other variants
    /// (e.g., a parsed pipeline missing an expected element).
    #[error("Other error: {0}")]
    Other(String),
}

impl From<dust_dds::infrastructure::error::DdsError> for Error {
    fn from(e: dust_dds::infrastructure::error::DdsError) -> Self {
        Error::Dds(e)
    }
}
