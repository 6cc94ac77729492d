use serde::Serialize;

pub const RETRACEMENT: f64 = 0.618;
pub const EXTENSION: f64 = 1.272;

/// Swing range and the two levels the dashboard trades against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibLevels {
    pub swing_high: f64,
    pub swing_low: f64,
    /// `high - 0.618 * range`: the pullback entry.
    pub buy: f64,
    /// `low + 1.272 * range`: the extension target.
    pub target: f64,
}

impl FibLevels {
    pub fn from_range(swing_high: f64, swing_low: f64) -> Self {
        let diff = swing_high - swing_low;
        Self {
            swing_high,
            swing_low,
            buy: swing_high - RETRACEMENT * diff,
            target: swing_low + EXTENSION * diff,
        }
    }

    /// Levels over the last `lookback` bars, or all of them.
    pub fn compute(highs: &[f64], lows: &[f64], lookback: Option<usize>) -> Option<Self> {
        let take = lookback.unwrap_or(highs.len()).min(highs.len()).min(lows.len());
        if take == 0 {
            return None;
        }
        let high = highs[highs.len() - take..]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let low = lows[lows.len() - take..]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        Some(Self::from_range(high, low))
    }
}
