// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! The sample type video frames travel as on the wire.

/// One encoded video frame as published on the DDS topic.
///
/// Frames carry the raw encoded bitstream of a single frame together with a
/// monotonically increasing sequence number, so subscribers can detect gaps
/// when samples are dropped. The DDS type name of this struct must match on
/// both ends; see [`crate::config::DEFAULT_TOPIC`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    dust_dds::topic_definition::type_support::DdsType,
)]
pub struct Video {
    /// Identifier of the publishing peer.
    pub user_id: i16,

    /// Sequence number of this frame, starting at 0.
    pub frame_num: i32,

    /// Encoded frame data as produced by the pipeline's encoder.
    pub frame: Vec<u8>,
}
