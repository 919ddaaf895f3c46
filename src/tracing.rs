//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Log output options for the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Raise the default level from WARN to DEBUG.
    pub verbose: bool,
    /// Emit one JSON object per event instead of compact text.
    pub json: bool,
}

/// Initialize tracing. Safe to call multiple times.
///
/// `RUST_LOG` directives apply on top of the default level. Logs go to stderr so
/// command output on stdout stays clean.
pub fn init(options: LogOptions) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test || options.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        let filter = EnvFilter::from_default_env().add_directive(level.into());

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true);

        let result = if is_test {
            builder.with_test_writer().compact().try_init()
        } else if options.json {
            builder.with_writer(std::io::stderr).json().try_init()
        } else {
            builder.with_writer(std::io::stderr).compact().try_init()
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
