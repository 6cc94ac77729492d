//! Plain-text rendering of analysis and scan results.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use signal_engine::{
    AnalysisResult,
    fibonacci::{EXTENSION, RETRACEMENT},
    pattern::PatternLabel,
    projection::ProfitProjection,
};

pub const DISCLAIMER: &str =
    "Score and days-to-target are heuristics, not probabilities or forecasts. Not investment advice.";

/// One line of a scan summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    pub ticker: String,
    pub pattern: PatternLabel,
    pub score: u8,
}

impl From<&AnalysisResult> for ScanRow {
    fn from(r: &AnalysisResult) -> Self {
        Self {
            ticker: r.ticker.clone(),
            pattern: r.pattern,
            score: r.score,
        }
    }
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{label:<22}{value}");
}

fn projection_lines(out: &mut String, p: &ProfitProjection) {
    line(out, "  shares", p.shares);
    line(out, "  cost", format!("{:.2}", p.cost));
    line(out, "  value at target", format!("{:.2}", p.target_value));
    line(out, "  profit", format!("{:.2} ({:+.2}%)", p.profit, p.roi_pct));
}

/// Human-readable report for one analysis.
///
/// `repriced` is the projection at a user-supplied buy price, shown after the
/// one at the current price.
pub fn render_analysis(r: &AnalysisResult, repriced: Option<&ProfitProjection>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  [{} / {} horizon]  as of {}",
        r.ticker,
        r.strategy,
        r.horizon,
        r.as_of.format("%Y-%m-%d")
    );
    line(&mut out, "Score (heuristic)", format!("{} / 98", r.score));
    line(&mut out, "Price", format!("{:.2}", r.current_price));
    line(&mut out, "Pattern", r.pattern);
    line(&mut out, "Breakout", if r.breakout { "yes" } else { "no" });
    if let Some(rsi) = r.rsi {
        line(&mut out, "RSI(14)", format!("{rsi:.1}"));
    }

    let _ = writeln!(out, "Fibonacci");
    line(&mut out, "  swing high", format!("{:.2}", r.swing_high));
    line(&mut out, "  swing low", format!("{:.2}", r.swing_low));
    line(&mut out, &format!("  buy ({RETRACEMENT})"), format!("{:.2}", r.fib_buy));
    line(&mut out, &format!("  target ({EXTENSION})"), format!("{:.2}", r.fib_target));

    let _ = writeln!(out, "Position at {:.2}", r.projection.entry_price);
    projection_lines(&mut out, &r.projection);
    if let Some(p) = repriced {
        let _ = writeln!(out, "Position at buy price {:.2}", p.entry_price);
        projection_lines(&mut out, p);
    }
    line(&mut out, "Days to target (est.)", r.days_to_target);

    if r.reasons.is_empty() {
        let _ = writeln!(out, "All signals aligned for this strategy.");
    } else {
        let _ = writeln!(out, "Cautions");
        for reason in &r.reasons {
            let _ = writeln!(out, "  - {reason}");
        }
    }
    let _ = writeln!(out, "{DISCLAIMER}");
    out
}

/// Fixed-width `{ticker, pattern, score}` table.
pub fn render_scan_table(rows: &[ScanRow]) -> String {
    let mut out = format!("{:<12}{:<14}{:>5}\n", "TICKER", "PATTERN", "SCORE");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12}{:<14}{:>5}",
            row.ticker,
            row.pattern.to_string(),
            row.score
        );
    }
    out
}
