//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a fallback filter
///
/// `RUST_LOG` still wins when set. Repeated calls are ignored, which keeps
/// tests that share a process from panicking.
pub fn init_with_level(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}
