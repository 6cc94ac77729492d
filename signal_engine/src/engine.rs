//! The single entry point: bars in, [`AnalysisResult`] out.

use chrono::{DateTime, Utc};
use market_data_ingestor::{
    models::{bar_series::BarSeries, raw_table::RawTable, timeframe::TimeFrame},
    normalize::{NormalizeError, normalize_table},
};
use serde::Serialize;
use tracing::debug;

use crate::{
    breakout::is_breakout,
    config::EngineConfig,
    fibonacci::FibLevels,
    frame::IndicatorFrame,
    pattern::{self, PatternLabel, PatternPoint},
    projection::{ProfitProjection, days_to_target},
    request::{AnalysisRequest, Horizon, Strategy},
    score::{Scorecard, Snapshot, score},
};

/// Everything the dashboard shows for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub strategy: Strategy,
    pub horizon: Horizon,
    pub as_of: DateTime<Utc>,
    /// Heuristic score in `0..=98`, not a probability.
    pub score: u8,
    pub current_price: f64,
    pub shares: u64,
    pub fib_buy: f64,
    pub fib_target: f64,
    pub swing_high: f64,
    pub swing_low: f64,
    pub projection: ProfitProjection,
    /// Heuristic estimate from ATR.
    pub days_to_target: u32,
    pub reasons: Vec<String>,
    pub breakout: bool,
    pub pattern: PatternLabel,
    pub pattern_points: Vec<PatternPoint>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub vwap: Option<f64>,
    pub atr: Option<f64>,
    #[serde(skip)]
    pub frame: IndicatorFrame,
}

impl AnalysisResult {
    /// The projection re-run at a different buy price, same target and budget.
    pub fn reprice(&self, budget: f64, entry: f64) -> Option<ProfitProjection> {
        ProfitProjection::at_price(budget, entry, self.fib_target)
    }
}

/// Runs the full analysis on a cleaned series.
///
/// Returns `None` when there is not enough (or not usable) data, or the
/// budget is not a positive number. Pure: the same input always gives the
/// same output.
pub fn analyze(
    series: &BarSeries,
    request: &AnalysisRequest,
    config: &EngineConfig,
) -> Option<AnalysisResult> {
    let n = series.len();
    if n < config.min_bars.max(2) {
        debug!(symbol = %series.symbol, bars = n, min = config.min_bars, "not enough bars");
        return None;
    }
    if !request.budget.is_finite() || request.budget <= 0.0 {
        debug!(budget = request.budget, "budget must be positive");
        return None;
    }
    let finite = series
        .bars
        .iter()
        .all(|b| [b.open, b.high, b.low, b.close, b.volume].iter().all(|v| v.is_finite()));
    if !finite {
        debug!(symbol = %series.symbol, "series holds non-finite values");
        return None;
    }

    let frame = IndicatorFrame::compute(series);
    let highs = series.highs();
    let lows = series.lows();
    let closes = series.closes();
    let last = series.last()?;
    let close = last.close;

    let fib = FibLevels::compute(&highs, &lows, config.fib_lookback)?;
    let scan = pattern::scan(
        &highs,
        &lows,
        &closes,
        config.extrema_order,
        config.pattern_tolerance,
    );
    let window = config.breakout_window.for_horizon(request.horizon);
    let breakout = is_breakout(&closes, &highs, &frame.bandwidth, window);

    let pattern = match (scan.pattern, breakout) {
        (Some(p), _) => p.into(),
        (None, true) => PatternLabel::Breakout,
        (None, false) => PatternLabel::RangeBound,
    };

    let snapshot = Snapshot {
        close,
        ema8: frame.latest("ema8"),
        ma20: frame.latest("ma20"),
        rsi: frame.latest("rsi"),
        macd: frame.latest("macd"),
        signal: frame.latest("signal"),
        vwap: frame.latest("vwap"),
        fib_buy: fib.buy,
        breakout,
        pattern: scan.pattern,
    };
    let Scorecard { score, reasons } = score(request.strategy, &snapshot);

    let projection = ProfitProjection::at_price(request.budget, close, fib.target)?;
    let atr = frame.latest("atr");
    let days = days_to_target(close, fib.target, atr, config.target_damping);

    debug!(
        symbol = %series.symbol,
        score,
        %pattern,
        breakout,
        fib_buy = fib.buy,
        fib_target = fib.target,
        "analysis complete"
    );

    Some(AnalysisResult {
        ticker: series.symbol.clone(),
        strategy: request.strategy,
        horizon: request.horizon,
        as_of: last.timestamp,
        score,
        current_price: close,
        shares: projection.shares,
        fib_buy: fib.buy,
        fib_target: fib.target,
        swing_high: fib.swing_high,
        swing_low: fib.swing_low,
        projection,
        days_to_target: days,
        reasons,
        breakout,
        pattern,
        pattern_points: scan.points,
        rsi: snapshot.rsi,
        macd: snapshot.macd,
        signal: snapshot.signal,
        vwap: snapshot.vwap,
        atr,
        frame,
    })
}

/// Normalizes a raw provider table sampled at `timeframe`, then analyzes it.
pub fn analyze_table(
    table: &RawTable,
    timeframe: TimeFrame,
    request: &AnalysisRequest,
    config: &EngineConfig,
) -> Result<Option<AnalysisResult>, NormalizeError> {
    let series = normalize_table(&request.symbol(), timeframe, table)?;
    Ok(analyze(&series, request, config))
}
