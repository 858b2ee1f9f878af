//! Tracing setup.
//!
//! Logs go to stderr so describe output on stdout stays clean.
//! `SVCAT_LOG` (EnvFilter syntax) overrides the level picked by `-v`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SVCAT_LOG";

/// Level directive for a `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // try_init: a subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
