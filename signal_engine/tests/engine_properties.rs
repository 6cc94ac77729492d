use chrono::{DateTime, Duration, TimeZone, Utc};
use market_data_ingestor::models::{bar::Bar, bar_series::BarSeries, timeframe::TimeFrame};
use proptest::prelude::*;
use signal_engine::{
    AnalysisRequest, EngineConfig, Horizon, Strategy as TradeStrategy, analyze, indicators,
    pattern::PatternLabel,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
}

/// Bars whose open is the previous close, with a fixed wick on both sides.
fn series_from_closes(closes: &[f64], wick: f64) -> BarSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let o = if i == 0 { c } else { closes[i - 1] };
            Bar::new(
                t0() + Duration::days(i as i64),
                o,
                o.max(c) + wick,
                o.min(c) - wick,
                c,
                10_000.0,
            )
        })
        .collect();
    BarSeries::new("PROP", TimeFrame::day(), bars)
}

/// Rise from 100 to 200 over 130 bars along `curve` (0..=1 onto 0..=1),
/// opening at the previous close with no pullbacks.
fn rally(symbol: &str, curve: impl Fn(f64) -> f64) -> BarSeries {
    let closes: Vec<f64> = (0..130).map(|i| 100.0 + 100.0 * curve(i as f64 / 129.0)).collect();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let o = if i == 0 { c } else { closes[i - 1] };
            Bar::new(t0() + Duration::days(i as i64), o, c, o, c, 1_000.0)
        })
        .collect();
    BarSeries::new(symbol, TimeFrame::day(), bars)
}

/// Accelerating rise, so the bands keep widening.
fn cubic_rally() -> BarSeries {
    rally("RALLY", |x| x.powi(3))
}

#[test]
fn rally_end_to_end() {
    let req = AnalysisRequest::new("RALLY", 10_000.0)
        .with_strategy(TradeStrategy::Breakout)
        .with_horizon(Horizon::Mid);
    let res = analyze(&cubic_rally(), &req, &EngineConfig::default()).unwrap();

    assert!((res.fib_buy - 138.2).abs() < 1e-6, "fib_buy {}", res.fib_buy);
    assert!((res.fib_target - 227.2).abs() < 1e-6, "fib_target {}", res.fib_target);
    assert!(res.breakout);
    assert_eq!(res.pattern, PatternLabel::Breakout);
    assert!(res.pattern_points.is_empty());
    assert_eq!(res.shares, 50);
    // every bonus fires and only the overbought RSI costs points
    assert_eq!(res.score, 98);
    assert_eq!(res.reasons.len(), 1);
    assert!(res.reasons[0].contains("overbought"));
    assert!(res.days_to_target > 0);
}

#[test]
fn straight_line_rally_is_not_a_breakout() {
    let req = AnalysisRequest::new("LINE", 10_000.0).with_strategy(TradeStrategy::Breakout);
    let res = analyze(&rally("LINE", |x| x), &req, &EngineConfig::default()).unwrap();

    assert!((res.fib_buy - 138.2).abs() < 1e-6, "fib_buy {}", res.fib_buy);
    assert!((res.fib_target - 227.2).abs() < 1e-6, "fib_target {}", res.fib_target);

    // a new high every bar, but constant steps keep the std flat while the
    // middle band rises, so bandwidth narrows
    let bw = res.frame.column("bandwidth").unwrap();
    let n = bw.len();
    assert!(bw[n - 1].unwrap() < bw[n - 2].unwrap());
    assert!(!res.breakout);
    assert_eq!(res.pattern, PatternLabel::RangeBound);
}

#[test]
fn rally_breaks_out_for_every_horizon() {
    for horizon in [Horizon::Short, Horizon::Mid, Horizon::Long] {
        let req = AnalysisRequest::new("RALLY", 10_000.0).with_horizon(horizon);
        let res = analyze(&cubic_rally(), &req, &EngineConfig::default()).unwrap();
        assert!(res.breakout, "{horizon}");
    }
}

#[test]
fn ten_bars_is_no_result() {
    let closes: Vec<f64> = (0..10).map(|i| 50.0 + i as f64).collect();
    let req = AnalysisRequest::new("PROP", 1_000.0);
    assert!(analyze(&series_from_closes(&closes, 0.5), &req, &EngineConfig::default()).is_none());
}

#[test]
fn breakout_only_on_the_crossing_bar() {
    let mut closes: Vec<f64> = (0..79).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
    let req = AnalysisRequest::new("PROP", 10_000.0).with_horizon(Horizon::Mid);
    let cfg = EngineConfig::default();

    let before = analyze(&series_from_closes(&closes, 0.5), &req, &cfg).unwrap();
    assert!(!before.breakout);

    closes.push(110.0);
    let after = analyze(&series_from_closes(&closes, 0.5), &req, &cfg).unwrap();
    assert!(after.breakout);
}

fn closes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.04f64..0.04, 60..200).prop_map(|returns| {
        let mut price = 100.0;
        returns
            .into_iter()
            .map(|r| {
                price *= 1.0 + r;
                price
            })
            .collect()
    })
}

fn strategy_choice() -> impl Strategy<Value = TradeStrategy> {
    prop_oneof![
        Just(TradeStrategy::Conservative),
        Just(TradeStrategy::Aggressive),
        Just(TradeStrategy::Breakout),
        Just(TradeStrategy::DayTrade),
    ]
}

proptest! {
    #[test]
    fn score_and_sizing_bounds(
        closes in closes_strategy(),
        budget in 1.0f64..1_000_000.0,
        strategy in strategy_choice(),
    ) {
        let series = series_from_closes(&closes, 0.25);
        let req = AnalysisRequest::new("PROP", budget).with_strategy(strategy);
        let res = analyze(&series, &req, &EngineConfig::default()).unwrap();

        prop_assert!(res.score <= 98);
        let close = *closes.last().unwrap();
        prop_assert_eq!(res.current_price, close);
        prop_assert_eq!(res.shares, (budget / close).floor() as u64);
        if res.swing_high > res.swing_low {
            prop_assert!(res.fib_buy < res.swing_high);
            prop_assert!(res.fib_target > res.swing_low);
        }
    }

    #[test]
    fn rsi_stays_in_range(closes in closes_strategy()) {
        for v in indicators::rsi(&closes, 14, 0.001).into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&v), "rsi {}", v);
        }
    }

    #[test]
    fn hist_is_macd_minus_signal(closes in closes_strategy()) {
        let m = indicators::macd(&closes, 12, 26, 9);
        let signal = indicators::ema(&m.macd, 9);
        for i in 0..closes.len() {
            prop_assert!((m.hist[i] - (m.macd[i] - signal[i])).abs() < 1e-9);
        }
    }

    #[test]
    fn breakout_implies_close_above_prior_highs(closes in closes_strategy()) {
        let series = series_from_closes(&closes, 0.25);
        let req = AnalysisRequest::new("PROP", 10_000.0).with_horizon(Horizon::Short);
        let res = analyze(&series, &req, &EngineConfig::default()).unwrap();
        if res.breakout {
            let highs = series.highs();
            let n = highs.len();
            let prior = highs[n - 11..n - 1].iter().copied().fold(f64::MIN, f64::max);
            prop_assert!(res.current_price > prior);
        }
    }

    #[test]
    fn identical_input_identical_output(closes in closes_strategy()) {
        let series = series_from_closes(&closes, 0.25);
        let req = AnalysisRequest::new("PROP", 25_000.0);
        let cfg = EngineConfig::default();
        let a = analyze(&series, &req, &cfg).unwrap();
        let b = analyze(&series, &req, &cfg).unwrap();
        prop_assert_eq!(a.pattern, b.pattern);
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.pattern_points, b.pattern_points);
        prop_assert_eq!(a.reasons, b.reasons);
    }
}
