use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// Bar interval: amount × unit (e.g. 5-minute, 1-day).
///
/// Which combinations are allowed is up to each provider; see the
/// `validate_timeframe` function next to each provider implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub const fn new(amount: u32, unit: TimeFrameUnit) -> Self {
        Self { amount, unit }
    }

    pub const fn day() -> Self {
        Self::new(1, TimeFrameUnit::Day)
    }

    pub const fn week() -> Self {
        Self::new(1, TimeFrameUnit::Week)
    }

    pub const fn hour() -> Self {
        Self::new(1, TimeFrameUnit::Hour)
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        Self::day()
    }
}

/// Formats the compact interval notation used on the command line: `5m`,
/// `1h`, `1d`, `1wk`, `1mo`.
impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TimeFrameUnit::Minute => "m",
            TimeFrameUnit::Hour => "h",
            TimeFrameUnit::Day => "d",
            TimeFrameUnit::Week => "wk",
            TimeFrameUnit::Month => "mo",
        };
        write!(f, "{}{}", self.amount, unit)
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TimeFrameError::InvalidInput {
                message: format!("missing unit in timeframe '{s}'"),
            })?;
        let (digits, unit) = s.split_at(split);
        let amount: u32 = if digits.is_empty() {
            1
        } else {
            digits.parse().map_err(|_| TimeFrameError::InvalidInput {
                message: format!("invalid amount in timeframe '{s}'"),
            })?
        };

        // "M" (month) must be checked before lowercasing collapses it into minutes.
        let unit = match unit {
            "M" => TimeFrameUnit::Month,
            other => match other.to_lowercase().as_str() {
                "m" | "min" | "minute" => TimeFrameUnit::Minute,
                "h" | "hr" | "hour" => TimeFrameUnit::Hour,
                "d" | "day" => TimeFrameUnit::Day,
                "w" | "wk" | "week" => TimeFrameUnit::Week,
                "mo" | "month" => TimeFrameUnit::Month,
                _ => {
                    return Err(TimeFrameError::InvalidInput {
                        message: format!("Invalid timeframe unit: {unit}"),
                    });
                }
            },
        };

        if amount == 0 {
            return Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be greater than zero".into(),
            });
        }
        Ok(TimeFrame::new(amount, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeframe() {
        assert_eq!("5m".parse::<TimeFrame>().unwrap(), TimeFrame::new(5, TimeFrameUnit::Minute));
        assert_eq!("2h".parse::<TimeFrame>().unwrap(), TimeFrame::new(2, TimeFrameUnit::Hour));
        assert_eq!("1d".parse::<TimeFrame>().unwrap(), TimeFrame::day());
        assert_eq!("d".parse::<TimeFrame>().unwrap(), TimeFrame::day());
        assert_eq!("1wk".parse::<TimeFrame>().unwrap(), TimeFrame::week());
        assert_eq!("3M".parse::<TimeFrame>().unwrap(), TimeFrame::new(3, TimeFrameUnit::Month));
        assert_eq!("1mo".parse::<TimeFrame>().unwrap(), TimeFrame::new(1, TimeFrameUnit::Month));
    }

    #[test]
    fn test_invalid_timeframes() {
        assert!("".parse::<TimeFrame>().is_err());
        assert!("15".parse::<TimeFrame>().is_err());
        assert!("5x".parse::<TimeFrame>().is_err());
        assert!(matches!(
            "0d".parse::<TimeFrame>(),
            Err(TimeFrameError::InvalidAmount { unit: TimeFrameUnit::Day, .. })
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for tf in [TimeFrame::new(15, TimeFrameUnit::Minute), TimeFrame::day(), TimeFrame::week()] {
            assert_eq!(tf.to_string().parse::<TimeFrame>().unwrap(), tf);
        }
    }
}
