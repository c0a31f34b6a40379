use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::time::OffsetTime;

/// Installs a global `tracing` subscriber that writes to stderr.
///
/// The library itself only emits events (e.g. when a singular matrix is inverted), so this is
/// for binaries and tests that want to see them. Calling it more than once returns an error
/// from the second call onwards rather than panicking.
pub fn setup_log() -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("setup_log(): {e}"))
}
