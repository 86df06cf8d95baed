use std::sync::OnceLock;

use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static INSTALL_GUARD: OnceLock<()> = OnceLock::new();

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber once: `RUST_LOG` filtering, compact lines on
/// stderr, `log` records bridged into `tracing`.
pub fn init_tracing() {
    INSTALL_GUARD.get_or_init(|| {
        if LogTracer::init().is_err() {
            // Another logger already owns the `log` facade; continue.
        }

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(SystemTime)
            .with_target(false)
            .with_ansi(false)
            .compact();

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);

        if subscriber.try_init().is_err() {
            // Global subscriber already installed elsewhere; ignore.
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("tracing initialised twice");
    }
}
