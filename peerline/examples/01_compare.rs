mod common;
use common::{get_connector, init_tracing};
use peerline::{Horizon, Peerline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Build the orchestrator around the connector.
    let peerline = Peerline::builder().with_connector(get_connector()).build()?;

    // 2. Resolve the selection the way a shared link would carry it.
    //    Usage: cargo run --example 01_compare -- "VALE3.SA,ITSA4.SA" 1y
    let mut args = std::env::args().skip(1);
    let stocks = args
        .next()
        .unwrap_or_else(|| "ITSA4.SA,VALE3.SA,TAEE11.SA,MXRF11.SA,HASH11.SA".to_string());
    let horizon: Horizon = match args.next() {
        Some(h) => h.parse()?,
        None => peerline.config().default_horizon,
    };
    let selection = peerline.selection_from_query([("stocks", stocks.as_str())])?;
    if let Some((k, v)) = selection.to_query_pair() {
        println!("share: ?{k}={v}");
    }

    // 3. Fetch and compare.
    let report = peerline.compare(&selection, horizon).await?;

    println!("{} over {}", report.normalized.len(), horizon.label());
    let bw = &report.best_worst;
    println!("best:  {} {}%", bw.best.symbol, bw.best.percent());
    println!("worst: {} {}%", bw.worst.symbol, bw.worst.percent());

    for panel in &report.peers {
        let last = panel.delta.iter().rev().find_map(|s| s.value);
        match last {
            Some(d) => println!("{:<10} vs peers: {d:+.3}", panel.symbol.as_str()),
            None => println!("{:<10} vs peers: n/a", panel.symbol.as_str()),
        }
    }

    Ok(())
}
