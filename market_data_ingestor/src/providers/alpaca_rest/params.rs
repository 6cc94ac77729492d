use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

/// Specifies the source feed for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

/// Specifies the sort order for the bars.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

/// Checks the amount/unit combinations Alpaca accepts.
pub fn validate_timeframe(tf: &TimeFrame) -> Result<(), ProviderError> {
    let ok = match tf.unit {
        TimeFrameUnit::Minute => (1..=59).contains(&tf.amount),
        TimeFrameUnit::Hour => (1..=23).contains(&tf.amount),
        TimeFrameUnit::Day | TimeFrameUnit::Week => tf.amount == 1,
        TimeFrameUnit::Month => [1, 2, 3, 6, 12].contains(&tf.amount),
    };
    if ok {
        Ok(())
    } else {
        ValidationSnafu {
            message: format!("Alpaca does not support a {tf} timeframe"),
        }
        .fail()
    }
}

/// Alpaca's timeframe notation: `5Min`, `1Hour`, `1Day`, `1Week`, `3Month`.
pub fn timeframe_param(tf: &TimeFrame) -> String {
    let unit = match tf.unit {
        TimeFrameUnit::Minute => "Min",
        TimeFrameUnit::Hour => "Hour",
        TimeFrameUnit::Day => "Day",
        TimeFrameUnit::Week => "Week",
        TimeFrameUnit::Month => "Month",
    };
    format!("{}{}", tf.amount, unit)
}

fn enum_param<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
}

/// Builds the query string for one page (without the page token).
pub fn construct_params(params: &BarsRequestParams, end: DateTime<Utc>) -> Vec<(String, String)> {
    let start = params.period.start_from(end);
    let mut query = vec![
        ("symbols".to_string(), params.provider_symbols().join(",")),
        ("timeframe".to_string(), timeframe_param(&params.timeframe)),
        ("start".to_string(), start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ("end".to_string(), end.to_rfc3339_opts(SecondsFormat::Secs, true)),
    ];

    if let ProviderParams::Alpaca(extra) = &params.provider_specific {
        if let Some(v) = extra.adjustment.as_ref().and_then(enum_param) {
            query.push(("adjustment".to_string(), v));
        }
        if let Some(v) = extra.feed.as_ref().and_then(enum_param) {
            query.push(("feed".to_string(), v));
        }
        if let Some(limit) = extra.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(v) = extra.sort.as_ref().and_then(enum_param) {
            query.push(("sort".to_string(), v));
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{market::Market, period::LookbackPeriod};
    use chrono::TimeZone;

    #[test]
    fn timeframe_rules() {
        assert!(validate_timeframe(&TimeFrame::new(5, TimeFrameUnit::Minute)).is_ok());
        assert!(validate_timeframe(&TimeFrame::new(60, TimeFrameUnit::Minute)).is_err());
        assert!(validate_timeframe(&TimeFrame::new(24, TimeFrameUnit::Hour)).is_err());
        assert!(validate_timeframe(&TimeFrame::new(2, TimeFrameUnit::Day)).is_err());
        assert!(validate_timeframe(&TimeFrame::new(6, TimeFrameUnit::Month)).is_ok());
        assert!(validate_timeframe(&TimeFrame::new(4, TimeFrameUnit::Month)).is_err());
    }

    #[test]
    fn query_includes_extras() {
        let end = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut params = BarsRequestParams::daily("aapl", Market::UsEquity, LookbackPeriod::OneYear);
        params.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
            sort: Some(Sort::Desc),
            limit: Some(5),
            ..Default::default()
        });

        let query = construct_params(&params, end);
        let get = |k: &str| query.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("symbols"), Some("AAPL"));
        assert_eq!(get("timeframe"), Some("1Day"));
        assert_eq!(get("start"), Some("2025-01-01T00:00:00Z"));
        assert_eq!(get("sort"), Some("desc"));
        assert_eq!(get("limit"), Some("5"));
        assert_eq!(get("feed"), None);
    }
}
