use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The exchange a ticker code belongs to.
///
/// Taiwan listings are entered as bare numeric codes (`2317`) and need the
/// `.TW` suffix before they reach a provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    #[default]
    UsEquity,
    TaiwanEquity,
}

impl Market {
    /// Maps a user-entered code to the symbol providers expect.
    pub fn provider_symbol(&self, code: &str) -> String {
        let code = code.trim().to_uppercase();
        match self {
            Market::UsEquity => code,
            Market::TaiwanEquity if code.ends_with(".TW") || code.ends_with(".TWO") => code,
            Market::TaiwanEquity => format!("{code}.TW"),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::UsEquity => write!(f, "us"),
            Market::TaiwanEquity => write!(f, "tw"),
        }
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "us_equity" => Ok(Market::UsEquity),
            "tw" | "twse" | "taiwan" | "taiwan_equity" => Ok(Market::TaiwanEquity),
            other => Err(format!("unknown market: {other} (expected us or tw)")),
        }
    }
}
