use indicatif::{ProgressBar, ProgressStyle};
use signal_engine::{AnalysisRequest, analyze};
use tracing::{info, warn};

use crate::{
    cli::ScanArgs,
    commands::{Context, fetch_series},
    notify::{Notifier, build_notifier},
    report::{ScanRow, render_scan_table},
};

/// Fetches and analyzes each ticker in turn. Tickers that fail to fetch or
/// have too little history are logged and left out.
pub async fn collect_rows(ctx: &Context<'_>, args: &ScanArgs, progress: &ProgressBar) -> Vec<ScanRow> {
    let mut rows = Vec::with_capacity(args.tickers.len());
    for ticker in &args.tickers {
        let request = AnalysisRequest::new(ticker.trim(), args.trade.budget)
            .with_market(args.trade.market)
            .with_strategy(args.trade.strategy)
            .with_horizon(args.trade.horizon);
        let symbol = request.symbol();
        progress.set_message(symbol.clone());

        match fetch_series(ctx.provider, &request).await {
            Ok(Some(series)) => match analyze(&series, &request, &ctx.config.engine) {
                Some(result) => rows.push(ScanRow::from(&result)),
                None => warn!(%symbol, bars = series.len(), "skipping: not enough usable history"),
            },
            Ok(None) => warn!(%symbol, "skipping: no data"),
            Err(err) => warn!(%symbol, error = %err, "skipping: fetch failed"),
        }
        progress.inc(1);
    }

    rows.retain(|r| r.score >= args.min_score);
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

pub async fn run(ctx: &Context<'_>, args: ScanArgs) -> anyhow::Result<()> {
    let pb = progress_bar(args.tickers.len());
    let rows = collect_rows(ctx, &args, &pb).await;
    pb.finish_and_clear();

    info!(requested = args.tickers.len(), shown = rows.len(), "scan finished");

    let notifier = if args.notify {
        match build_notifier(&ctx.config.notify) {
            Ok(n) => Some(n),
            Err(err) => {
                warn!(error = %err, "could not set up notifier");
                None
            }
        }
    } else {
        None
    };

    // the stdout notifier prints the table itself
    if notifier.as_ref().is_none_or(|n| n.name() != "stdout") {
        print!("{}", render_scan_table(&rows));
    }
    if let Some(notifier) = notifier {
        if let Err(err) = notifier.send(&rows).await {
            warn!(notifier = notifier.name(), error = %err, "notification failed");
        }
    }
    Ok(())
}
