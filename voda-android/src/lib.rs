// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Android camera publisher for VoDA, built as the `androidsink` native
//! library.
//!
//! The library captures the device camera, shows a local preview on a Java
//! `Surface` and publishes the encoded frames over DDS using the [`voda`]
//! crate. The Java side talks to it exclusively through JNI: `nativeInit`
//! wires GLib and GStreamer logging into logcat, registers the statically
//! linked plugins and initializes GStreamer; `nativeRun` starts the publish
//! pipeline; the `SurfaceHolderCallback` natives hand the render surface
//! over and take it back as the activity goes through its lifecycle.
//!
//! The surface and the pipeline have independent lifetimes. A surface bound
//! before streaming starts is attached to the video overlay when the
//! pipeline is created, and a surface bound while streaming repoints the
//! overlay immediately, so the two sides never have to coordinate.
//!
//! [`runtime`] and [`surface`] build on every target, which keeps the state
//! handling testable off-device; only the JNI and logcat layers are Android
//! specific.

pub mod runtime;
pub mod surface;

#[cfg(target_os = "android")]
mod glue;
#[cfg(target_os = "android")]
mod logging;

pub use runtime::{bind_surface, is_running, release_surface, start, surface_handle, StartOutcome};
pub use surface::{BindOutcome, NativeWindow, SurfaceBinding};
