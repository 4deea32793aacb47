//! Logging setup for the memegen tools.
//!
//! Logs go to stderr so command output on stdout stays scriptable.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// HTTP and TLS crates that are chatty at `debug` and below.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

/// Filter directives for a configured level.
///
/// A bare level such as `debug` also caps the HTTP stack at `info`. A full
/// directive string (anything with `=` or `,`) is used as given.
pub fn directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return "info".to_string();
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let mut out = level.to_string();
    for target in QUIET_TARGETS {
        out.push_str(&format!(",{target}=info"));
    }
    out
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. Calling this twice keeps the first subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(directives(&config.level)).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(true)
            .compact()
            .try_init()
    };

    if installed.is_ok() {
        tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    }
}
