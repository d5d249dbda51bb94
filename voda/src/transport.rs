// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! DDS transport for video frames.
//!
//! This module provides [`Session`], the connection to a DDS domain, and the
//! endpoints created from it:
//! - [`FramePublisher`] stamps and writes frames ([`publisher`])
//! - [`FrameReceiver`] delivers incoming frames to a callback ([`receiver`])

pub mod publisher;
pub mod receiver;

use dust_dds::{
    configuration::DustDdsConfigurationBuilder,
    domain::{
        domain_participant::DomainParticipant, domain_participant_factory::DomainParticipantFactory,
    },
    infrastructure::{
        qos::QosKind,
        status::{NO_STATUS, StatusKind},
    },
    topic_definition::topic::Topic,
};

pub use publisher::FramePublisher;
pub use receiver::FrameReceiver;

use crate::{Result, Video, config::StreamConfig, transport::receiver::FrameListener};

/// A connection to a DDS domain, scoped to one video topic.
///
/// A `Session` owns the domain participant and the topic every endpoint of
/// this process attaches to. Publishers and receivers are created from it and
/// discover their remote peers through the matching domain id and topic name
/// in [`StreamConfig`].
///
/// The session must outlive the endpoints created from it only logically, not
/// by lifetime: endpoints keep the underlying DDS entities alive on their own.
///
/// # Examples
///
/// ```no_run
/// use voda::{config::StreamConfig, transport::Session};
///
/// # fn main() -> Result<(), voda::Error> {
/// let session = Session::connect(&StreamConfig::default())?;
/// let mut publisher = session.publisher()?;
/// publisher.publish(vec![0u8; 16])?;
/// # Ok(())
/// # }
/// ```
pub struct Session {
    participant: DomainParticipant,
    topic: Topic,
    user_id: i16,
}

impl Session {
    /// Connects to the DDS domain named by `config`.
    ///
    /// This tunes the transport for large samples (60 kB fragments and a
    /// receive buffer sized for 46 of them, enough for a full encoded frame),
    /// creates the domain participant and registers the video topic under
    /// `config.topic`, which also serves as the DDS type name.
    ///
    /// # Arguments
    ///
    /// * `config` - Domain id, topic name and the user id stamped on
    ///   published frames
    ///
    /// # Returns
    ///
    /// A session ready to create endpoints from.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Dds`] if the participant or topic cannot be
    /// created, e.g. when the configured transport sockets cannot be opened.
    pub fn connect(config: &StreamConfig) -> Result<Self> {
        let participant_factory = DomainParticipantFactory::get_instance();
        participant_factory.set_configuration(
            DustDdsConfigurationBuilder::new()
                .fragment_size(60000)
                .udp_receive_buffer_size(Some(60000 * 46))
                .build()?,
        )?;

        let participant = participant_factory.create_participant(
            config.domain_id,
            QosKind::Default,
            None,
            NO_STATUS,
        )?;

        let topic = participant.create_topic::<Video>(
            &config.topic,
            &config.topic,
            QosKind::Default,
            None,
            NO_STATUS,
        )?;

        Ok(Self {
            participant,
            topic,
            user_id: config.user_id,
        })
    }

    /// Creates a publisher endpoint on this session's topic.
    ///
    /// Each publisher numbers its frames independently, starting at 0, and
    /// stamps them with the session's user id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Dds`] if the DDS publisher or data writer
    /// cannot be created.
    pub fn publisher(&self) -> Result<FramePublisher> {
        let publisher = self
            .participant
            .create_publisher(QosKind::Default, None, NO_STATUS)?;
        let writer = publisher.create_datawriter(&self.topic, QosKind::Default, None, NO_STATUS)?;
        Ok(FramePublisher::new(writer, self.user_id))
    }

    /// Creates a receiver endpoint that runs `on_frame` for every frame
    /// arriving on this session's topic.
    ///
    /// The callback is invoked on a DDS listener thread, one frame at a time.
    /// It must not block for long: frames keep arriving while it runs and the
    /// reader's history is shallow.
    ///
    /// # Arguments
    ///
    /// * `on_frame` - Called with each received [`Video`] sample
    ///
    /// # Returns
    ///
    /// The receiver handle representing the subscription. Keep it for as
    /// long as frames should be delivered.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Dds`] if the DDS subscriber or data reader
    /// cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use voda::{config::StreamConfig, transport::Session};
    ///
    /// # fn main() -> Result<(), voda::Error> {
    /// let session = Session::connect(&StreamConfig::default())?;
    /// let _receiver = session.receiver(|video| {
    ///     println!("frame {}: {} bytes", video.frame_num, video.frame.len());
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn receiver<F>(&self, on_frame: F) -> Result<FrameReceiver>
    where
        F: FnMut(Video) + Send + 'static,
    {
        let subscriber = self
            .participant
            .create_subscriber(QosKind::Default, None, NO_STATUS)?;
        let reader = subscriber.create_datareader(
            &self.topic,
            QosKind::Default,
            Some(Box::new(FrameListener { on_frame })),
            &[StatusKind::DataAvailable],
        )?;
        Ok(FrameReceiver::new(reader))
    }

    /// Returns the user id stamped on frames published from this session.
    pub fn user_id(&self) -> i16 {
        self.user_id
    }
}
