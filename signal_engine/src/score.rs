//! Heuristic "win-rate" score.
//!
//! Additive points on a fixed base, clamped to `0..=98`. It ranks setups
//! against each other; it is not a probability.

use crate::{pattern::SwingPattern, request::Strategy};

pub const BASE_SCORE: i32 = 60;
pub const MAX_SCORE: i32 = 98;

const W_BOTTOM_BONUS: i32 = 30;
const M_TOP_PENALTY: i32 = 20;
const BREAKOUT_BONUS: i32 = 25;
const TREND_BONUS: i32 = 10;
const STRATEGY_BONUS: i32 = 15;
const BREAKOUT_STRATEGY_BONUS: i32 = 10;
const STRATEGY_PENALTY: i32 = 10;
const OVERSOLD_BONUS: i32 = 5;
const OVERBOUGHT_PENALTY: i32 = 5;

/// Price may sit this far above the 0.618 level and still count as "at support".
const SUPPORT_BAND: f64 = 1.02;
const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// Latest-bar readings the score looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub close: f64,
    pub ema8: Option<f64>,
    pub ma20: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub vwap: Option<f64>,
    pub fib_buy: f64,
    pub breakout: bool,
    pub pattern: Option<SwingPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub score: u8,
    /// Cautions, in the order they were found. Empty when everything lines up.
    pub reasons: Vec<String>,
}

pub fn score(strategy: Strategy, s: &Snapshot) -> Scorecard {
    let mut points = BASE_SCORE;
    let mut reasons = Vec::new();

    match s.pattern {
        Some(SwingPattern::WBottom) => points += W_BOTTOM_BONUS,
        Some(SwingPattern::MTop) => {
            points -= M_TOP_PENALTY;
            reasons.push("M-top: the second peak failed to clear the first".to_string());
        }
        None => {}
    }
    if s.breakout {
        points += BREAKOUT_BONUS;
    }
    if let (Some(ema), Some(ma)) = (s.ema8, s.ma20) {
        if ema > ma {
            points += TREND_BONUS;
        }
    }

    match strategy {
        Strategy::Conservative => {
            if s.close <= s.fib_buy * SUPPORT_BAND {
                points += STRATEGY_BONUS;
                if s.rsi.is_some_and(|r| r < RSI_OVERSOLD) {
                    points += OVERSOLD_BONUS;
                }
            } else {
                points -= STRATEGY_PENALTY;
                reasons.push(format!(
                    "Price {:.2} is above the 0.618 support {:.2}; wait for a pullback",
                    s.close, s.fib_buy
                ));
            }
        }
        Strategy::Aggressive => match (s.macd, s.signal) {
            (Some(m), Some(sig)) if m > sig => points += STRATEGY_BONUS,
            _ => {
                points -= STRATEGY_PENALTY;
                reasons.push("MACD is below its signal line; momentum is not confirmed".to_string());
            }
        },
        Strategy::Breakout => {
            if s.breakout {
                points += BREAKOUT_STRATEGY_BONUS;
            } else {
                points -= STRATEGY_PENALTY;
                reasons.push(
                    "No breakout: close has not cleared the recent high on widening bands".to_string(),
                );
            }
        }
        Strategy::DayTrade => match s.vwap {
            Some(v) if s.close > v => points += STRATEGY_BONUS,
            Some(v) => {
                points -= STRATEGY_PENALTY;
                reasons.push(format!("Price {:.2} is below VWAP {:.2}", s.close, v));
            }
            None => {
                points -= STRATEGY_PENALTY;
                reasons.push("VWAP unavailable: no traded volume".to_string());
            }
        },
    }

    if let Some(r) = s.rsi.filter(|r| *r > RSI_OVERBOUGHT) {
        points -= OVERBOUGHT_PENALTY;
        reasons.push(format!("RSI {r:.1} is overbought"));
    }

    Scorecard {
        score: points.clamp(0, MAX_SCORE) as u8,
        reasons,
    }
}
