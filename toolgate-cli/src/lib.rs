//! Helpers shared by the `setup-gateway` and `run-agent` binaries.

use rand::Rng;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the fmt subscriber once, falling back to `default_filter` when
/// `RUST_LOG` is unset.
pub fn init_tracing(default_filter: &str) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .try_init();
    });
}

/// Four zero-padded digits identifying one setup run.
pub fn random_suffix() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..10_000))
}

/// `MMm:SSs`, with minutes allowed to grow past two digits.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}m:{:02}s", total / 60, total % 60)
}
