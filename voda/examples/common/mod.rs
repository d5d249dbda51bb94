// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by the publisher and subscriber tools.

use tracing_subscriber::EnvFilter;

/// Installs the tracing subscriber the streaming tools log through.
///
/// Without `RUST_LOG` the tools log at `info`, with the library's own
/// diagnostics raised to `debug`. Set `RUST_LOG=voda=trace` to log every
/// frame crossing the transport.
pub fn setup_logging() {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(spec) if !spec.is_empty() => EnvFilter::new(spec),
        _ => EnvFilter::new("info,voda=debug"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
