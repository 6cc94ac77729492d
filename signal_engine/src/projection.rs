use serde::Serialize;

/// What a whole-share position bought at `entry_price` is worth at the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitProjection {
    pub entry_price: f64,
    pub target_price: f64,
    pub shares: u64,
    /// `shares * entry_price`.
    pub cost: f64,
    pub target_value: f64,
    pub profit: f64,
    pub roi_pct: f64,
}

impl ProfitProjection {
    /// Sizes `budget` at `entry` (whole shares, rounded down).
    ///
    /// `None` for a non-positive or non-finite budget or price.
    pub fn at_price(budget: f64, entry: f64, target: f64) -> Option<Self> {
        let valid = budget.is_finite() && budget > 0.0 && entry.is_finite() && entry > 0.0;
        if !valid || !target.is_finite() {
            return None;
        }
        let shares = (budget / entry).floor() as u64;
        let qty = shares as f64;
        Some(Self {
            entry_price: entry,
            target_price: target,
            shares,
            cost: qty * entry,
            target_value: qty * target,
            profit: qty * (target - entry),
            roi_pct: (target / entry - 1.0) * 100.0,
        })
    }
}

/// Rough bars-to-target estimate: distance over `damping * ATR`.
///
/// A heuristic for display only; 0 when ATR is missing or not positive.
pub fn days_to_target(current: f64, target: f64, atr: Option<f64>, damping: f64) -> u32 {
    let Some(step) = atr.map(|a| a * damping).filter(|s| s.is_finite() && *s > 0.0) else {
        return 0;
    };
    let days = ((target - current).abs() / step).floor();
    if days.is_finite() { days.min(u32::MAX as f64) as u32 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_whole_shares() {
        let p = ProfitProjection::at_price(1_000.0, 30.0, 36.0).unwrap();
        assert_eq!(p.shares, 33);
        assert!((p.cost - 990.0).abs() < 1e-9);
        assert!((p.target_value - 1_188.0).abs() < 1e-9);
        assert!((p.profit - 198.0).abs() < 1e-9);
        assert!((p.roi_pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn budget_below_one_share() {
        let p = ProfitProjection::at_price(10.0, 30.0, 36.0).unwrap();
        assert_eq!(p.shares, 0);
        assert_eq!(p.profit, 0.0);
        assert!(p.roi_pct > 0.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(ProfitProjection::at_price(0.0, 30.0, 36.0).is_none());
        assert!(ProfitProjection::at_price(-5.0, 30.0, 36.0).is_none());
        assert!(ProfitProjection::at_price(f64::NAN, 30.0, 36.0).is_none());
        assert!(ProfitProjection::at_price(100.0, 0.0, 36.0).is_none());
        assert!(ProfitProjection::at_price(100.0, 30.0, f64::INFINITY).is_none());
    }

    #[test]
    fn days_estimate() {
        assert_eq!(days_to_target(100.0, 114.0, Some(2.0), 0.7), 10);
        assert_eq!(days_to_target(100.0, 86.0, Some(2.0), 0.7), 10);
        assert_eq!(days_to_target(100.0, 114.0, Some(0.0), 0.7), 0);
        assert_eq!(days_to_target(100.0, 114.0, None, 0.7), 0);
    }
}
