// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! The receiving endpoint of a video stream.

use dust_dds::subscription::{
    data_reader::DataReader,
    data_reader_listener::DataReaderListener,
    sample_info::{ANY_INSTANCE_STATE, ANY_SAMPLE_STATE, ANY_VIEW_STATE},
};

use crate::Video;

/// Represents a frame subscription.
///
/// The receiver holds the DDS data reader whose listener feeds the callback
/// passed to [`crate::transport::Session::receiver`]. Hold on to it for as
/// long as frames should be delivered.
pub struct FrameReceiver {
    _reader: DataReader<Video>,
}

impl FrameReceiver {
    pub(crate) fn new(reader: DataReader<Video>) -> Self {
        Self { _reader: reader }
    }
}

/// Listener bridging DDS data-available notifications to a frame callback.
pub(crate) struct FrameListener<F> {
    pub(crate) on_frame: F,
}

impl<'a, F> DataReaderListener<'a> for FrameListener<F>
where
    F: FnMut(Video) + Send + 'static,
{
    type Foo = Video;

    fn on_data_available(&mut self, the_reader: DataReader<Self::Foo>) {
        // A notification with nothing left to take surfaces as an Err here.
        let samples = match the_reader.read(1, ANY_SAMPLE_STATE, ANY_VIEW_STATE, ANY_INSTANCE_STATE)
        {
            Ok(samples) => samples,
            Err(_) => return,
        };

        for sample in samples {
            match sample.data() {
                Ok(video_sample) => {
                    tracing::trace!("received frame {}", video_sample.frame_num);
                    (self.on_frame)(video_sample);
                }
                Err(e) => tracing::warn!("dropping undecodable sample: {:?}", e),
            }
        }
    }
}
