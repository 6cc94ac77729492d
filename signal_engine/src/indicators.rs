//! Textbook indicator formulas over plain `f64` slices.
//!
//! Rolling indicators return `Vec<Option<f64>>` aligned with the input, with
//! `None` until their window is filled. Exponential averages use the
//! recursive form `y[0] = x[0]`, `y[t] = (1 - a)·y[t-1] + a·x[t]` and are
//! defined from the first bar.

/// Simple moving average over `window` values.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Sample (n - 1) standard deviation over `window` values.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    rolling(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let ss: f64 = w.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (w.len() - 1) as f64).sqrt()
    })
}

/// Highest value over the last `window` values, current one included.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn rolling(values: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for (i, w) in values.windows(window).enumerate() {
        out[i + window - 1] = Some(f(w));
    }
    out
}

/// Exponentially weighted mean with smoothing factor `alpha`.
pub fn ewm(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &x in values {
        let next = match prev {
            None => x,
            Some(p) => (1.0 - alpha) * p + alpha * x,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Exponential moving average by span, `alpha = 2 / (span + 1)`.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    ewm(values, 2.0 / (span as f64 + 1.0))
}

/// Relative Strength Index with Wilder smoothing (`alpha = 1 / period`).
///
/// The first bar has no change and is `None`. When the smoothed loss is zero
/// it is replaced with `zero_loss_guard` so a straight rally reads close to
/// 100 instead of dividing by zero.
pub fn rsi(closes: &[f64], period: usize, zero_loss_guard: f64) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if closes.len() < 2 || period == 0 {
        return out;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            (delta.max(0.0), (-delta).max(0.0))
        })
        .unzip();

    let alpha = 1.0 / period as f64;
    let avg_gain = ewm(&gains, alpha);
    let avg_loss = ewm(&losses, alpha);

    for (i, (g, l)) in avg_gain.iter().zip(&avg_loss).enumerate() {
        let denom = if *l > 0.0 { *l } else { zero_loss_guard };
        out[i + 1] = Some(100.0 - 100.0 / (1.0 + g / denom));
    }
    out
}

/// MACD line, its signal line and the histogram between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub hist: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);
    let hist = line.iter().zip(&signal_line).map(|(m, s)| m - s).collect();
    Macd {
        macd: line,
        signal: signal_line,
        hist,
    }
}

/// Bollinger bands around an SMA, plus relative bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct Bollinger {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    /// `(upper - lower) / middle`; `None` where the middle band is zero.
    pub bandwidth: Vec<Option<f64>>,
}

pub fn bollinger(closes: &[f64], window: usize, k: f64) -> Bollinger {
    let middle = sma(closes, window);
    let std = rolling_std(closes, window);

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());
    let mut bandwidth = Vec::with_capacity(closes.len());
    for (m, s) in middle.iter().zip(&std) {
        match (m, s) {
            (Some(m), Some(s)) => {
                let up = m + k * s;
                let lo = m - k * s;
                upper.push(Some(up));
                lower.push(Some(lo));
                bandwidth.push((m.abs() > f64::EPSILON).then(|| (up - lo) / m));
            }
            _ => {
                upper.push(None);
                lower.push(None);
                bandwidth.push(None);
            }
        }
    }
    Bollinger {
        middle,
        upper,
        lower,
        bandwidth,
    }
}

/// Cumulative volume-weighted average of the close.
///
/// `None` until some volume has traded.
pub fn vwap(closes: &[f64], volumes: &[f64]) -> Vec<Option<f64>> {
    let mut pv = 0.0;
    let mut vol = 0.0;
    closes
        .iter()
        .zip(volumes)
        .map(|(c, v)| {
            pv += c * v;
            vol += v;
            (vol > 0.0).then(|| pv / vol)
        })
        .collect()
}

/// `max(H - L, |H - prevC|, |L - prevC|)`; the first bar uses `H - L`.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    (0..highs.len())
        .map(|i| {
            let range = highs[i] - lows[i];
            if i == 0 {
                range
            } else {
                let prev = closes[i - 1];
                range.max((highs[i] - prev).abs()).max((lows[i] - prev).abs())
            }
        })
        .collect()
}

/// Average true range as a simple mean of the true range.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], window: usize) -> Vec<Option<f64>> {
    sma(&true_range(highs, lows, closes), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sma() {
        let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let ma3 = sma(&closes, 3);
        assert_eq!(ma3[0], None);
        assert_eq!(ma3[1], None);
        assert_eq!(ma3[2], Some(11.0));
        assert_eq!(ma3[5], Some(14.0));
        assert!(sma(&closes, 10).iter().all(Option::is_none));
    }

    #[test]
    fn test_rolling_std_is_sample_std() {
        let s = rolling_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        // population std of this set is 2.0; sample std is sqrt(32/7)
        assert!(close_to(s[7].unwrap(), (32.0f64 / 7.0).sqrt()));
    }

    #[test]
    fn test_ema_seeded_with_first_value() {
        let e = ema(&[10.0, 20.0, 20.0], 3);
        assert_eq!(e[0], 10.0);
        assert!(close_to(e[1], 15.0));
        assert!(close_to(e[2], 17.5));
    }

    #[test]
    fn test_rsi_straight_rally_uses_guard() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let r = rsi(&closes, 14, 0.001);
        assert_eq!(r[0], None);
        let last = r[29].unwrap();
        assert!(last > 99.9 && last < 100.0, "rsi {last}");
    }

    #[test]
    fn test_rsi_straight_decline_is_zero() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let r = rsi(&closes, 14, 0.001);
        assert!(close_to(r[29].unwrap(), 0.0));
    }

    #[test]
    fn test_macd_hist_identity() {
        let closes: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let m = macd(&closes, 12, 26, 9);
        let signal = ema(&m.macd, 9);
        for i in 0..closes.len() {
            assert!(close_to(m.hist[i], m.macd[i] - signal[i]));
        }
    }

    #[test]
    fn test_bollinger_flat_window() {
        let b = bollinger(&[5.0; 25], 20, 2.0);
        assert_eq!(b.bandwidth[18], None);
        assert_eq!(b.bandwidth[24], Some(0.0));
        assert_eq!(b.upper[24], Some(5.0));
    }

    #[test]
    fn test_bollinger_zero_price_guard() {
        let b = bollinger(&[0.0; 25], 20, 2.0);
        assert!(b.middle[24].is_some());
        assert_eq!(b.bandwidth[24], None);
    }

    #[test]
    fn test_vwap_waits_for_volume() {
        let v = vwap(&[10.0, 12.0, 14.0], &[0.0, 1.0, 3.0]);
        assert_eq!(v[0], None);
        assert_eq!(v[1], Some(12.0));
        assert!(close_to(v[2].unwrap(), (12.0 + 42.0) / 4.0));
    }

    #[test]
    fn test_true_range_uses_gaps() {
        let tr = true_range(&[10.0, 15.0], &[9.0, 14.0], &[9.5, 14.5]);
        assert_eq!(tr, vec![1.0, 5.5]);
    }
}
