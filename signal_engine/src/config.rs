use serde::{Deserialize, Serialize};

use crate::request::Horizon;

/// Tunable parameters of [`analyze`](crate::engine::analyze).
///
/// Indicator periods (MA20, EMA 8/12/26, RSI 14, Bollinger 20/2σ, ATR 20)
/// are fixed and live in [`frame`](crate::frame).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fewer bars than this and no analysis is produced.
    pub min_bars: usize,
    /// Bars used for the Fibonacci swing range; `None` uses the whole series.
    pub fib_lookback: Option<usize>,
    /// Bars on each side a local extremum must dominate.
    pub extrema_order: usize,
    /// Relative slack when comparing the two peaks (or troughs) of a pattern.
    pub pattern_tolerance: f64,
    pub breakout_window: BreakoutWindows,
    /// Fraction of ATR assumed to be covered per bar when estimating days to target.
    pub target_damping: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_bars: 40,
            fib_lookback: None,
            extrema_order: 10,
            pattern_tolerance: 0.02,
            breakout_window: BreakoutWindows::default(),
            target_damping: 0.7,
        }
    }
}

/// Breakout look-back in bars, per horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakoutWindows {
    pub short: usize,
    pub mid: usize,
    pub long: usize,
}

impl Default for BreakoutWindows {
    fn default() -> Self {
        Self {
            short: 10,
            mid: 20,
            long: 60,
        }
    }
}

impl BreakoutWindows {
    pub fn for_horizon(&self, horizon: Horizon) -> usize {
        match horizon {
            Horizon::Short => self.short,
            Horizon::Mid => self.mid,
            Horizon::Long => self.long,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        engine: EngineConfig,
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let w: Wrapper =
            serde_json::from_str(r#"{"engine": {"min_bars": 60, "breakout_window": {"long": 120}}}"#)
                .unwrap();
        assert_eq!(w.engine.min_bars, 60);
        assert_eq!(w.engine.extrema_order, 10);
        assert_eq!(w.engine.breakout_window.long, 120);
        assert_eq!(w.engine.breakout_window.short, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<EngineConfig, _> = serde_json::from_str(r#"{"min_bar": 10}"#);
        assert!(res.is_err());
    }

    #[test]
    fn window_per_horizon() {
        let w = BreakoutWindows::default();
        assert_eq!(w.for_horizon(Horizon::Short), 10);
        assert_eq!(w.for_horizon(Horizon::Mid), 20);
        assert_eq!(w.for_horizon(Horizon::Long), 60);
    }
}
