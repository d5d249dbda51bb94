// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Captures video from the default system source and publishes every encoded
//! frame to a DDS topic, with a local preview window.
//!
//! Run a `subscriber` on another machine in the same network (or another
//! terminal) to watch the stream.

mod common;

use clap::Parser;

use voda::{config::StreamConfig, pipeline, transport::Session};

#[derive(Parser)]
#[command(version, about = "Publish captured video over DDS")]
struct Args {
    /// DDS domain to join.
    #[arg(short, long, default_value_t = voda::config::DEFAULT_DOMAIN_ID)]
    domain_id: i32,

    /// User id stamped on published frames.
    #[arg(short, long, default_value_t = voda::config::DEFAULT_USER_ID)]
    user_id: i16,

    /// Topic to publish on.
    #[arg(short, long, default_value = voda::config::DEFAULT_TOPIC)]
    topic: String,

    /// Capture pipeline description overriding the built-in one.
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
    let publisher = session.publisher()?;

    let pipeline = pipeline::launch(
        args.pipeline
            .as_deref()
            .unwrap_or(pipeline::DESKTOP_PUBLISH),
    )?;
    pipeline::publish_from_appsink(&pipeline, publisher)?;

    tracing::info!(
        "publishing as user {} on domain {}, topic {:?}",
        config.user_id,
        config.domain_id,
        config.topic
    );
    pipeline::run(&pipeline)
}
