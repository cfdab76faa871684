use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static TELEMETRY: OnceLock<()> = OnceLock::new();

/// Process-wide tracing setup behind an explicit init-once guard. Calling
/// it again is a no-op.
pub fn init_telemetry() {
    TELEMETRY.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    });
}
