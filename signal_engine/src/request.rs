//! What the caller asks the engine for.

use std::{fmt, str::FromStr};

use market_data_ingestor::models::{market::Market, period::LookbackPeriod};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Which condition the strategy term of the score checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Buy near the 0.618 retracement.
    #[default]
    Conservative,
    /// Follow MACD momentum.
    Aggressive,
    /// Require a confirmed breakout.
    Breakout,
    /// Trade above VWAP.
    DayTrade,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Conservative => "conservative",
            Strategy::Aggressive => "aggressive",
            Strategy::Breakout => "breakout",
            Strategy::DayTrade => "day-trade",
        })
    }
}

impl FromStr for Strategy {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "conservative" => Ok(Strategy::Conservative),
            "aggressive" => Ok(Strategy::Aggressive),
            "breakout" => Ok(Strategy::Breakout),
            "day-trade" | "daytrade" => Ok(Strategy::DayTrade),
            _ => Err(ParseChoiceError {
                kind: "strategy",
                value: s.to_string(),
                expected: "conservative, aggressive, breakout, day-trade",
            }),
        }
    }
}

/// Holding horizon. Picks the breakout window and the default history length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Horizon {
    Short,
    #[default]
    Mid,
    Long,
}

impl Horizon {
    /// History to fetch so the longest indicators have room to warm up.
    pub fn lookback(&self) -> LookbackPeriod {
        match self {
            Horizon::Short => LookbackPeriod::SixMonths,
            Horizon::Mid => LookbackPeriod::OneYear,
            Horizon::Long => LookbackPeriod::TwoYears,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Horizon::Short => "short",
            Horizon::Mid => "mid",
            Horizon::Long => "long",
        })
    }
}

impl FromStr for Horizon {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Horizon::Short),
            "mid" | "medium" => Ok(Horizon::Mid),
            "long" => Ok(Horizon::Long),
            _ => Err(ParseChoiceError {
                kind: "horizon",
                value: s.to_string(),
                expected: "short, mid, long",
            }),
        }
    }
}

/// One immutable analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Code as the user typed it; see [`AnalysisRequest::symbol`].
    pub ticker: String,
    pub market: Market,
    pub strategy: Strategy,
    pub horizon: Horizon,
    /// Cash available for the position, in quote currency.
    pub budget: f64,
}

impl AnalysisRequest {
    pub fn new(ticker: impl Into<String>, budget: f64) -> Self {
        Self {
            ticker: ticker.into(),
            market: Market::default(),
            strategy: Strategy::default(),
            horizon: Horizon::default(),
            budget,
        }
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = market;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Provider symbol, e.g. `2330` on the Taiwan market becomes `2330.TW`.
    pub fn symbol(&self) -> String {
        self.market.provider_symbol(&self.ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_round_trips_through_text() {
        for s in [
            Strategy::Conservative,
            Strategy::Aggressive,
            Strategy::Breakout,
            Strategy::DayTrade,
        ] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!("DAY_TRADE".parse::<Strategy>().unwrap(), Strategy::DayTrade);
    }

    #[test]
    fn bad_choice_names_the_options() {
        let err = "swing".parse::<Strategy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown strategy: 'swing' (expected one of: conservative, aggressive, breakout, day-trade)"
        );
        assert!("forever".parse::<Horizon>().is_err());
    }

    #[test]
    fn builder_and_symbol() {
        let req = AnalysisRequest::new("2330", 100_000.0)
            .with_market(Market::TaiwanEquity)
            .with_strategy(Strategy::Breakout)
            .with_horizon(Horizon::Long);
        assert_eq!(req.symbol(), "2330.TW");
        assert_eq!(req.horizon.lookback(), LookbackPeriod::TwoYears);
        assert_eq!(req.strategy, Strategy::Breakout);
    }
}
