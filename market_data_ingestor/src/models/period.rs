use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How much history to request, counted back from "now".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookbackPeriod {
    SixMonths,
    OneYear,
    #[default]
    TwoYears,
    FiveYears,
    Max,
}

impl LookbackPeriod {
    /// Approximate span in calendar days; `None` for [`LookbackPeriod::Max`].
    pub fn days(&self) -> Option<i64> {
        match self {
            LookbackPeriod::SixMonths => Some(183),
            LookbackPeriod::OneYear => Some(365),
            LookbackPeriod::TwoYears => Some(730),
            LookbackPeriod::FiveYears => Some(1826),
            LookbackPeriod::Max => None,
        }
    }

    /// Inclusive start of the window ending at `end`.
    ///
    /// `Max` is capped at 30 years for providers that need an explicit start.
    pub fn start_from(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        end - Duration::days(self.days().unwrap_or(30 * 365))
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookbackPeriod::SixMonths => "6mo",
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::TwoYears => "2y",
            LookbackPeriod::FiveYears => "5y",
            LookbackPeriod::Max => "max",
        };
        f.write_str(s)
    }
}

impl FromStr for LookbackPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "6mo" => Ok(LookbackPeriod::SixMonths),
            "1y" => Ok(LookbackPeriod::OneYear),
            "2y" => Ok(LookbackPeriod::TwoYears),
            "5y" => Ok(LookbackPeriod::FiveYears),
            "max" => Ok(LookbackPeriod::Max),
            other => Err(format!("unknown period: {other} (expected 6mo, 1y, 2y, 5y or max)")),
        }
    }
}
