// service/src/telemetry.rs

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the default INFO level.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  let result = if json {
    builder.json().try_init()
  } else {
    builder.try_init()
  };
  if result.is_err() {
    tracing::debug!("Tracing subscriber already installed.");
  }
}
