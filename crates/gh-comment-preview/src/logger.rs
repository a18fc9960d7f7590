//! Logging to stderr using env_logger
//!
//! Rendered markdown goes to stdout, so logs must stay on stderr.
//! The level comes from `RUST_LOG` and defaults to `warn`.

use env_logger::{Env, Target};

/// Initialize the global logger
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .init();
}
