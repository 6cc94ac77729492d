/// True when the newest close clears the highest high of the `window` bars
/// before the current one (`highs[n-1-window..n-1]`, the current bar excluded)
/// while the Bollinger bandwidth is widening.
///
/// Needs `window + 1` bars and two defined bandwidth readings; otherwise false.
pub fn is_breakout(closes: &[f64], highs: &[f64], bandwidth: &[Option<f64>], window: usize) -> bool {
    let n = closes.len();
    if window == 0 || n < window + 1 || highs.len() != n || bandwidth.len() != n {
        return false;
    }

    let prior_high = highs[n - 1 - window..n - 1]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let clears = closes[n - 1] > prior_high;

    let widening = matches!(
        (bandwidth[n - 2], bandwidth[n - 1]),
        (Some(prev), Some(now)) if now > prev
    );

    clears && widening
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising_bw(n: usize) -> Vec<Option<f64>> {
        (0..n).map(|i| Some(i as f64 * 0.01)).collect()
    }

    #[test]
    fn crosses_on_last_bar_only() {
        let mut closes = vec![10.0; 30];
        let highs = vec![11.0; 30];
        let bw = rising_bw(30);
        assert!(!is_breakout(&closes, &highs, &bw, 10));
        closes[29] = 11.5;
        assert!(is_breakout(&closes, &highs, &bw, 10));
    }

    #[test]
    fn current_bar_high_is_excluded() {
        let closes = vec![10.0, 10.0, 10.0, 12.0];
        let highs = vec![11.0, 11.0, 11.0, 13.0];
        assert!(is_breakout(&closes, &highs, &rising_bw(4), 3));
    }

    #[test]
    fn window_spans_exactly_the_prior_bars() {
        let mut closes = vec![10.0; 30];
        closes[29] = 12.0;
        let mut highs = vec![11.0; 30];
        // oldest bar of a 10-bar window, then the bar just outside it
        highs[19] = 12.5;
        assert!(!is_breakout(&closes, &highs, &rising_bw(30), 10));
        highs[19] = 11.0;
        highs[18] = 12.5;
        assert!(is_breakout(&closes, &highs, &rising_bw(30), 10));
    }

    #[test]
    fn contracting_bands_veto() {
        let mut closes = vec![10.0; 30];
        closes[29] = 20.0;
        let highs = vec![11.0; 30];
        let mut bw = rising_bw(30);
        bw[29] = Some(0.0);
        assert!(!is_breakout(&closes, &highs, &bw, 10));
        bw[28] = None;
        assert!(!is_breakout(&closes, &highs, &bw, 10));
    }

    #[test]
    fn short_series() {
        assert!(!is_breakout(&[1.0, 2.0], &[1.0, 2.0], &rising_bw(2), 5));
        assert!(!is_breakout(&[], &[], &[], 1));
    }
}
