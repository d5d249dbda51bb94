// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Stream configuration shared by publishers and subscribers.
//!
//! This module defines the settings both ends of a video stream must agree
//! on (DDS domain, topic name) plus the knobs that only affect one side
//! (user id stamped on frames, GStreamer debug directive).

/// Default DDS domain on which publishers and subscribers meet.
pub const DEFAULT_DOMAIN_ID: i32 = 0;

/// Default identifier stamped on published frames.
pub const DEFAULT_USER_ID: i16 = 8;

/// Default topic name, also used as the DDS type name of the samples.
pub const DEFAULT_TOPIC: &str = "VideoStream";

/// Default `GST_DEBUG` directive applied by [`StreamConfig::apply_debug_env`].
pub const DEFAULT_GST_DEBUG: &str = "ahcsrc:3";

/// Settings for one end of a video stream.
///
/// Publisher and subscriber find each other through matching `domain_id`
/// and `topic` values. All fields have defaults, so a config deserialized
/// from partial JSON fills in the missing ones.
///
/// # Examples
///
/// ```
/// use voda::config::StreamConfig;
///
/// let config = StreamConfig {
///     domain_id: 7,
///     ..StreamConfig::default()
/// };
/// assert_eq!(config.topic, "VideoStream");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// DDS domain the participant joins.
    pub domain_id: i32,

    /// Identifier stamped on every frame published with this config.
    pub user_id: i16,

    /// Name of the topic video samples are exchanged on.
    pub topic: String,

    /// `GST_DEBUG` directive installed by [`apply_debug_env`](Self::apply_debug_env).
    pub gst_debug: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            domain_id: DEFAULT_DOMAIN_ID,
            user_id: DEFAULT_USER_ID,
            topic: DEFAULT_TOPIC.to_owned(),
            gst_debug: DEFAULT_GST_DEBUG.to_owned(),
        }
    }
}

impl StreamConfig {
    /// Exports the configured debug directive as the `GST_DEBUG` environment
    /// variable, overwriting any existing value.
    ///
    /// GStreamer reads `GST_DEBUG` when it is initialized, so this must run
    /// before [`crate::init`].
    pub fn apply_debug_env(&self) {
        // Safety: callers invoke this before `init`, while the process is
        // still single-threaded and no GStreamer thread can read the
        // environment concurrently.
        unsafe { std::env::set_var("GST_DEBUG", &self.gst_debug) };
    }
}
