// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Routes GLib and GStreamer log output to the Android log.
//!
//! Android discards anything written to stdout and stderr, so the default
//! GLib print handlers and the default GStreamer debug handler are replaced
//! with handlers that forward to logcat. Tags keep the originating system
//! visible: `GLib+stdout`, `GLib+stderr`, `Glib+<domain>` for structured
//! GLib logs and `GStreamer+<category>` for the debug log.

use std::ffi::CString;
use std::os::raw::c_int;

use gstreamer as gst;
use gst::{DebugCategory, DebugLevel, DebugMessage};
use ndk_sys::android_LogPriority;

pub(crate) const TAG: &str = "VoDA";

pub(crate) fn android_log_write(prio: android_LogPriority, tag: &str, msg: &str) {
    // Messages with interior NULs cannot cross the C boundary; drop them.
    let (Ok(tag), Ok(msg)) = (CString::new(tag), CString::new(msg)) else {
        return;
    };
    unsafe {
        ndk_sys::__android_log_write(prio.0 as c_int, tag.as_ptr(), msg.as_ptr());
    }
}

fn glib_print_handler(msg: &str) {
    android_log_write(android_LogPriority::ANDROID_LOG_INFO, "GLib+stdout", msg);
}

fn glib_printerr_handler(msg: &str) {
    android_log_write(android_LogPriority::ANDROID_LOG_ERROR, "GLib+stderr", msg);
}

fn glib_log_handler(domain: Option<&str>, level: glib::LogLevel, msg: &str) {
    let prio = match level {
        glib::LogLevel::Error | glib::LogLevel::Critical => {
            android_LogPriority::ANDROID_LOG_ERROR
        }
        glib::LogLevel::Warning => android_LogPriority::ANDROID_LOG_WARN,
        glib::LogLevel::Message | glib::LogLevel::Info => android_LogPriority::ANDROID_LOG_INFO,
        glib::LogLevel::Debug => android_LogPriority::ANDROID_LOG_DEBUG,
    };
    let tag = format!("Glib+{}", domain.unwrap_or(""));
    android_log_write(prio, &tag, msg);
}

fn debug_logcat(
    category: DebugCategory,
    level: DebugLevel,
    file: &glib::GStr,
    function: &glib::GStr,
    line: u32,
    object: Option<&gst::log::LoggedObject>,
    message: &DebugMessage,
) {
    if level > category.threshold() {
        return;
    }
    let prio = match level {
        DebugLevel::Error => android_LogPriority::ANDROID_LOG_ERROR,
        DebugLevel::Warning => android_LogPriority::ANDROID_LOG_WARN,
        DebugLevel::Info => android_LogPriority::ANDROID_LOG_INFO,
        DebugLevel::Debug => android_LogPriority::ANDROID_LOG_DEBUG,
        _ => android_LogPriority::ANDROID_LOG_VERBOSE,
    };

    let tag = format!("GStreamer+{}", category.name());
    let text = message.get().map(|m| m.to_string()).unwrap_or_default();
    let msg = match object {
        Some(object) => format!("{}:{}:{}:{} {}", file, line, function, object, text),
        None => format!("{}:{}:{} {}", file, line, function, text),
    };
    android_log_write(prio, &tag, &msg);
}

/// Installs the logcat handlers.
///
/// Must run before GStreamer is initialized so no early output is lost to
/// the default stdout handlers.
pub(crate) fn install() {
    glib::set_print_handler(glib_print_handler);
    glib::set_printerr_handler(glib_printerr_handler);
    glib::log_set_default_handler(glib_log_handler);

    gst::log::set_active(true);
    gst::log::set_default_threshold(DebugLevel::Warning);
    gst::log::remove_default_log_function();
    gst::log::add_log_function(debug_logcat);
}
