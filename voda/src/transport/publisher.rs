// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! The publishing endpoint of a video stream.

use dust_dds::publication::data_writer::DataWriter;

use crate::{Result, Video};

/// Writes encoded frames to the session's topic.
///
/// The publisher owns the frame numbering for its stream: every call to
/// [`publish`](Self::publish) stamps the frame with the next sequence number
/// and the user id the publisher was created with.
///
/// Created via [`crate::transport::Session::publisher`].
pub struct FramePublisher {
    writer: DataWriter<Video>,
    user_id: i16,
    frame_num: i32,
}

impl FramePublisher {
    pub(crate) fn new(writer: DataWriter<Video>, user_id: i16) -> Self {
        Self {
            writer,
            user_id,
            frame_num: 0,
        }
    }

    /// Publishes one encoded frame.
    ///
    /// The frame is wrapped in a [`Video`] sample carrying the publisher's
    /// user id and the next sequence number, then handed to DDS for delivery.
    ///
    /// # Arguments
    ///
    /// * `frame` - The encoded frame data, typically one access unit from
    ///   the pipeline's encoder
    ///
    /// # Returns
    ///
    /// The sequence number the frame was published under.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Dds`] if the sample cannot be written, e.g.
    /// when it exceeds the writer's resource limits.
    pub fn publish(&mut self, frame: Vec<u8>) -> Result<i32> {
        let video_sample = Video {
            user_id: self.user_id,
            frame_num: self.frame_num,
            frame,
        };
        self.writer.write(&video_sample, None)?;

        let published = self.frame_num;
        self.frame_num = self.frame_num.wrapping_add(1);
        Ok(published)
    }

    /// Returns the number of frames published so far.
    pub fn frames_published(&self) -> i32 {
        self.frame_num
    }

    /// Returns the user id stamped on frames from this publisher.
    pub fn user_id(&self) -> i16 {
        self.user_id
    }
}
