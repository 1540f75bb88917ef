//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::common::config::LoggingCfg;

/// Install the global subscriber described by `cfg`.
///
/// `RUST_LOG`, when set, takes precedence over the configured level. Calling
/// this twice is harmless; the second install is ignored.
pub fn init(cfg: &LoggingCfg) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if cfg.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
