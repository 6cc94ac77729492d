//! Local extrema and the double-top / double-bottom check.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How many of the most recent peaks (and troughs) feed the classifier.
const RECENT_PER_KIND: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumKind {
    Peak,
    Trough,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub index: usize,
    pub price: f64,
    pub kind: ExtremumKind,
}

/// One vertex of a pattern overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatternPoint {
    pub index: usize,
    pub price: f64,
}

/// Shape label shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternLabel {
    #[serde(rename = "M-top")]
    MTop,
    #[serde(rename = "W-bottom")]
    WBottom,
    #[serde(rename = "breakout")]
    Breakout,
    #[serde(rename = "range-bound")]
    RangeBound,
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternLabel::MTop => "M-top",
            PatternLabel::WBottom => "W-bottom",
            PatternLabel::Breakout => "breakout",
            PatternLabel::RangeBound => "range-bound",
        })
    }
}

/// A double top or double bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingPattern {
    MTop,
    WBottom,
}

impl From<SwingPattern> for PatternLabel {
    fn from(p: SwingPattern) -> Self {
        match p {
            SwingPattern::MTop => PatternLabel::MTop,
            SwingPattern::WBottom => PatternLabel::WBottom,
        }
    }
}

/// Indices strictly above every neighbour within `order` bars.
///
/// Neighbour indices are clipped to the series, so the first and last bar
/// compare against themselves and never qualify.
pub fn peaks(values: &[f64], order: usize) -> Vec<usize> {
    extrema(values, order, |x, n| x > n)
}

/// Indices strictly below every neighbour within `order` bars.
pub fn troughs(values: &[f64], order: usize) -> Vec<usize> {
    extrema(values, order, |x, n| x < n)
}

fn extrema(values: &[f64], order: usize, beats: impl Fn(f64, f64) -> bool) -> Vec<usize> {
    let n = values.len();
    if n == 0 || order == 0 {
        return Vec::new();
    }
    (0..n)
        .filter(|&i| {
            (1..=order.min(n)).all(|k| {
                let left = i.saturating_sub(k);
                let right = (i + k).min(n - 1);
                beats(values[i], values[left]) && beats(values[i], values[right])
            })
        })
        .collect()
}

/// The last few peaks (in highs) and troughs (in lows), merged by index.
pub fn recent_swings(highs: &[f64], lows: &[f64], order: usize) -> Vec<Extremum> {
    let tail = |idx: Vec<usize>, values: &[f64], kind| -> Vec<Extremum> {
        let skip = idx.len().saturating_sub(RECENT_PER_KIND);
        idx.into_iter()
            .skip(skip)
            .map(|index| Extremum {
                index,
                price: values[index],
                kind,
            })
            .collect()
    };

    let mut swings = tail(peaks(highs, order), highs, ExtremumKind::Peak);
    swings.extend(tail(troughs(lows, order), lows, ExtremumKind::Trough));
    swings.sort_by_key(|e| e.index);
    swings
}

/// Classifies the last four swings.
///
/// M-top: peak, trough, peak, trough with the second peak no higher than the
/// first (within `tolerance`). W-bottom: trough, peak, trough, peak with the
/// second trough no lower than the first.
pub fn classify(swings: &[Extremum], tolerance: f64) -> Option<SwingPattern> {
    use ExtremumKind::{Peak, Trough};

    let [a, b, c, d] = swings.get(swings.len().checked_sub(4)?..)? else {
        return None;
    };
    match (a.kind, b.kind, c.kind, d.kind) {
        (Peak, Trough, Peak, Trough) if c.price <= a.price * (1.0 + tolerance) => {
            Some(SwingPattern::MTop)
        }
        (Trough, Peak, Trough, Peak) if c.price >= a.price * (1.0 - tolerance) => {
            Some(SwingPattern::WBottom)
        }
        _ => None,
    }
}

/// Result of scanning one series for a double top or bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternScan {
    pub pattern: Option<SwingPattern>,
    /// The four swings and the current bar when a pattern is found, else empty.
    pub points: Vec<PatternPoint>,
}

pub fn scan(highs: &[f64], lows: &[f64], closes: &[f64], order: usize, tolerance: f64) -> PatternScan {
    let swings = recent_swings(highs, lows, order);
    let pattern = classify(&swings, tolerance);

    let points = match (pattern, closes.last()) {
        (Some(_), Some(&last_close)) => swings[swings.len() - 4..]
            .iter()
            .map(|e| PatternPoint {
                index: e.index,
                price: e.price,
            })
            .chain(std::iter::once(PatternPoint {
                index: closes.len() - 1,
                price: last_close,
            }))
            .collect(),
        _ => Vec::new(),
    };
    PatternScan { pattern, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Piecewise-linear path through `(index, price)` knots.
    fn path(knots: &[(usize, f64)]) -> Vec<f64> {
        let mut out = Vec::new();
        for w in knots.windows(2) {
            let ((i0, p0), (i1, p1)) = (w[0], w[1]);
            for i in i0..i1 {
                out.push(p0 + (p1 - p0) * (i - i0) as f64 / (i1 - i0) as f64);
            }
        }
        out.push(knots[knots.len() - 1].1);
        out
    }

    #[test]
    fn edges_are_never_extrema() {
        let rising: Vec<f64> = (0..30).map(f64::from).collect();
        assert!(peaks(&rising, 5).is_empty());
        assert!(troughs(&rising, 5).is_empty());
    }

    #[test]
    fn oversized_order_only_keeps_the_global_swing() {
        let v = [1.0, 3.0, 2.0, 5.0, 4.0, 1.0];
        assert_eq!(peaks(&v, usize::MAX), vec![3]);
        assert_eq!(peaks(&v, usize::MAX), peaks(&v, v.len()));
        assert!(troughs(&v, usize::MAX).is_empty());
    }

    #[test]
    fn plateau_is_not_strict() {
        let v = [1.0, 2.0, 3.0, 3.0, 2.0, 1.0];
        assert!(peaks(&v, 2).is_empty());
        assert_eq!(peaks(&[1.0, 2.0, 3.0, 2.0, 1.0], 2), vec![2]);
    }

    #[test]
    fn detects_m_top() {
        let v = path(&[(0, 90.0), (15, 100.0), (30, 85.0), (45, 99.0), (60, 84.0), (75, 92.0)]);
        let s = scan(&v, &v, &v, 5, 0.02);
        assert_eq!(s.pattern, Some(SwingPattern::MTop));
        assert_eq!(s.points.len(), 5);
        assert_eq!(s.points[0], PatternPoint { index: 15, price: 100.0 });
        assert_eq!(s.points[4].index, v.len() - 1);
    }

    #[test]
    fn detects_w_bottom() {
        let v = path(&[(0, 100.0), (15, 80.0), (30, 95.0), (45, 81.0), (60, 97.0), (75, 90.0)]);
        let s = scan(&v, &v, &v, 5, 0.02);
        assert_eq!(s.pattern, Some(SwingPattern::WBottom));
        assert_eq!(PatternLabel::from(SwingPattern::WBottom).to_string(), "W-bottom");
    }

    #[test]
    fn higher_second_peak_is_not_an_m_top() {
        let v = path(&[(0, 90.0), (15, 100.0), (30, 85.0), (45, 110.0), (60, 84.0), (75, 92.0)]);
        let s = scan(&v, &v, &v, 5, 0.02);
        assert_eq!(s.pattern, None);
        assert!(s.points.is_empty());
    }

    #[test]
    fn too_few_swings() {
        assert_eq!(classify(&[], 0.02), None);
        let v = path(&[(0, 90.0), (15, 100.0), (30, 85.0)]);
        assert_eq!(scan(&v, &v, &v, 5, 0.02).pattern, None);
    }

    #[test]
    fn label_serializes_to_display_text() {
        assert_eq!(serde_json::to_string(&PatternLabel::RangeBound).unwrap(), "\"range-bound\"");
        assert_eq!(serde_json::to_string(&PatternLabel::MTop).unwrap(), "\"M-top\"");
    }
}
