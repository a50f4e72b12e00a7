use peerline::PeerlineConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn PeerlineConnector> {
    println!("--- (Using Mock Connector with fixture closes) ---");
    Arc::new(peerline_mock::MockConnector::new())
}

/// Human-friendly subscriber; filter with e.g. `RUST_LOG=info,peerline=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
