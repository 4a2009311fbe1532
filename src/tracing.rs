//! Tracing setup for the renderer binary
//!
//! The library only emits events; installing a subscriber is left to the
//! host. `init` is the setup `bbrender` uses.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - fast-path selection and scene progress
//! - `RUST_LOG=blitbuffer::ops=trace` - every operator call
//! - `RUST_LOG=blitbuffer::scene=debug` - module-level filtering
//!
//! # Log Files
//!
//! With a log directory, events are also written to `bbrender.log` there with
//! daily rotation, always at debug level.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and optional file logging
///
/// Console output respects RUST_LOG (default `warn`). When `log_dir` is given
/// the directory is created if needed; failure to do so disables file
/// logging with a warning instead of aborting.
pub fn init(log_dir: Option<&Path>) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = log_dir.and_then(|dir| match std::fs::create_dir_all(dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(dir, "bbrender.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!(
                "Warning: Could not initialize file logging in {}: {}",
                dir.display(),
                e
            );
            None
        }
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
