// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! # VoDA - Video over DDS
//!
//! Peer-to-peer live video streaming over DDS, with GStreamer doing the
//! capture, encoding and playback.
//!
//! ## Overview
//!
//! A publishing peer captures video, encodes it as H.264 and publishes every
//! encoded frame as one DDS sample. A subscribing peer receives the samples
//! and feeds them into a playback pipeline. There are no addresses to
//! configure: peers discover each other through DDS and only need to agree
//! on a domain id and topic name ([`config::StreamConfig`]).
//!
//! ### Key Concepts
//!
//! - **Session**: A connection to a DDS domain, scoped to one video topic ([`Session`])
//! - **Publisher**: Stamps frames with a user id and sequence number and writes them ([`FramePublisher`])
//! - **Receiver**: Delivers incoming frames to a callback ([`FrameReceiver`])
//! - **Pipeline**: A GStreamer description doing capture or playback ([`pipeline`])
//!
//! ## Architecture
//!
//! ```text
//! camera ──► encoder ──► appsink ──► FramePublisher ──► DDS topic
//!                                                          │
//!        videosink ◄── appsrc ◄── FrameReceiver ◄──────────┘
//! ```
//!
//! ## Examples
//!
//! ### Publishing captured frames
//!
//! ```no_run
//! use voda::{config::StreamConfig, pipeline, transport::Session};
//!
//! # fn main() -> Result<(), voda::Error> {
//! voda::init()?;
//!
//! let session = Session::connect(&StreamConfig::default())?;
//! let pipeline = pipeline::launch(pipeline::DESKTOP_PUBLISH)?;
//! pipeline::publish_from_appsink(&pipeline, session.publisher()?)?;
//! pipeline::run(&pipeline)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Playing back received frames
//!
//! ```no_run
//! use voda::{config::StreamConfig, pipeline, transport::Session};
//!
//! # fn main() -> Result<(), voda::Error> {
//! voda::init()?;
//!
//! let session = Session::connect(&StreamConfig::default())?;
//! let pipeline = pipeline::launch(pipeline::PLAYBACK)?;
//! let appsrc = pipeline::playback_appsrc(&pipeline)?;
//! let _receiver = session.receiver(move |video| {
//!     if let Err(e) = pipeline::push_frame(&appsrc, &video.frame) {
//!         eprintln!("dropping frame {}: {}", video.frame_num, e);
//!     }
//! })?;
//! pipeline::run(&pipeline)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - [`Session`] is used from the thread of your choice; endpoints created
//!   from it move freely to other threads
//! - Published frames are handed over on a GStreamer streaming thread, so
//!   [`pipeline::publish_from_appsink`] takes the publisher by value
//! - Received frames are delivered on a DDS listener thread; the callback
//!   passed to [`Session::receiver`] must be `Send`

mod error;
mod frame;

pub mod config;
pub mod pipeline;
pub mod transport;

pub use error::{BusError, Error, Result};
pub use frame::Video;
pub use pipeline::init;
pub use transport::{FramePublisher, FrameReceiver, Session};
