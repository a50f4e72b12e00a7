mod common;
use common::{get_connector, init_tracing};
use peerline::{Horizon, Peerline, PeerlineError, SymbolSelection};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Run with `--features tracing` to see the retry-later warning as a log line.
    init_tracing();

    let peerline = Peerline::builder().with_connector(get_connector()).build()?;

    // The mock treats RATELIMIT as a throttled provider.
    let selection = SymbolSelection::parse_query_value("VALE3.SA,RATELIMIT")?;
    match peerline.compare(&selection, Horizon::M6).await {
        Ok(_) => println!("unexpected: report built"),
        Err(e @ PeerlineError::RateLimited { .. }) => println!("warning: {e}"),
        Err(e) => return Err(e.into()),
    }

    // Other selections keep working and are cached independently.
    let ok = SymbolSelection::parse_query_value("VALE3.SA,ITSA4.SA")?;
    let report = peerline.compare(&ok, Horizon::M6).await?;
    println!(
        "best {} at {}%",
        report.best_worst.best.symbol,
        report.best_worst.best.percent()
    );

    // Missing data is reported per symbol.
    let unknown = SymbolSelection::parse_query_value("VALE3.SA,NOPE3.SA")?;
    if let Err(e) = peerline.compare(&unknown, Horizon::M6).await {
        println!("error: {e}");
    }

    Ok(())
}
