//! Logging setup
//!
//! The crate logs through the `log` facade; binaries pick the backend.

pub use log::{debug, error, info, trace, warn};

/// Initialize `env_logger`, configured through `RUST_LOG`
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize `env_logger`, defaulting to `filter` when `RUST_LOG` is unset
pub fn init_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init();
        init_with_default("debug");
        info!("logging initialized twice");
    }
}
