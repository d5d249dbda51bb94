// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Receives video frames from a DDS topic and plays them back.
//!
//! Counterpart of the `publisher` example. Frames arriving on the topic are
//! pushed into a playback pipeline and rendered in a window.

mod common;

use clap::Parser;

use voda::{config::StreamConfig, pipeline, transport::Session};

#[derive(Parser)]
#[command(version, about = "Play back video received over DDS")]
struct Args {
    /// DDS domain to join.
    #[arg(short, long, default_value_t = voda::config::DEFAULT_DOMAIN_ID)]
    domain_id: i32,

    /// User id of this session.
    #[arg(short, long, default_value_t = voda::config::DEFAULT_USER_ID)]
    user_id: i16,

    /// Topic to subscribe to.
    #[arg(short, long, default_value = voda::config::DEFAULT_TOPIC)]
    topic: String,

    /// Playback pipeline description overriding the built-in one.
    #[arg(long)]
    pipeline: Option<String>,
}

fn main() -> Result<(), voda::Error> {
    common::setup_logging();
    let args = Args::parse();

    voda::init()?;

    let config = StreamConfig {
        domain_id: args.domain_id,
        user_id: args.user_id,
        topic: args.topic,
        ..StreamConfig::default()
    };
    let session = Session::connect(&config)?;

    let pipeline = pipeline::launch(args.pipeline.as_deref().unwrap_or(pipeline::PLAYBACK))?;
    let appsrc = pipeline::playback_appsrc(&pipeline)?;

    let _receiver = session.receiver(move |video| {
        tracing::info!(
            "received frame {} from user {} ({} bytes)",
            video.frame_num,
            video.user_id,
            video.frame.len()
        );
        if let Err(e) = pipeline::push_frame(&appsrc, &video.frame) {
            tracing::warn!("dropping frame {}: {}", video.frame_num, e);
        }
    })?;

    tracing::info!(
        "subscribed on domain {}, topic {:?}",
        config.domain_id,
        config.topic
    );
    pipeline::run(&pipeline)
}
