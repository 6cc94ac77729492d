use anyhow::Context as _;
use signal_engine::{AnalysisRequest, analyze};
use tracing::{info, warn};

use crate::{
    cli::AnalyzeArgs,
    commands::{Context, fetch_series},
    export::export_frame,
    report::render_analysis,
};

/// Printed instead of a report when there is nothing to analyze.
pub fn no_data_message(symbol: &str, min_bars: usize) -> String {
    format!(
        "No usable price history for {symbol} (need at least {min_bars} daily bars). \
         Check the ticker and market."
    )
}

/// One fetch, one analysis, one report on stdout.
///
/// Missing or insufficient data is reported as a neutral message, not an error.
pub async fn run(ctx: &Context<'_>, args: AnalyzeArgs) -> anyhow::Result<()> {
    let request = AnalysisRequest::new(args.ticker, args.trade.budget)
        .with_market(args.trade.market)
        .with_strategy(args.trade.strategy)
        .with_horizon(args.trade.horizon);
    let symbol = request.symbol();
    let min_bars = ctx.config.engine.min_bars;

    let series = match fetch_series(ctx.provider, &request).await {
        Ok(Some(series)) => series,
        Ok(None) => {
            println!("{}", no_data_message(&symbol, min_bars));
            return Ok(());
        }
        Err(err) => {
            warn!(%symbol, error = %err, "fetch failed");
            println!("{}", no_data_message(&symbol, min_bars));
            return Ok(());
        }
    };

    let Some(result) = analyze(&series, &request, &ctx.config.engine) else {
        println!("{}", no_data_message(&symbol, min_bars));
        return Ok(());
    };
    info!(%symbol, score = result.score, pattern = %result.pattern, "analysis ready");

    let repriced = match args.buy_price {
        Some(price) => {
            let p = result.reprice(request.budget, price);
            if p.is_none() {
                warn!(price, "ignoring buy price; it must be a positive number");
            }
            p
        }
        None => None,
    };
    print!("{}", render_analysis(&result, repriced.as_ref()));

    if let Some(target) = args.export {
        let path = export_frame(&result.frame, &target)
            .with_context(|| format!("could not export indicators to {}", target.display()))?;
        println!("Indicators written to {}", path.display());
    }
    Ok(())
}
