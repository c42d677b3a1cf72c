//! Scales: pure mappings from a domain value to a screen offset

use crate::record::Value;

/// A tick mark on an axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: Value,
    pub offset: f64,
}

/// Position mapping from a dimension's domain to a pixel offset.
///
/// Ranges are `[start, end]` pairs; a numeric axis uses `[inner_height, 0]`
/// so larger values plot higher.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    /// Continuous linear interpolation
    Linear { domain: [f64; 2], range: [f64; 2] },

    /// Evenly spaced discrete points, no padding, centre aligned
    Point { domain: Vec<String>, range: [f64; 2] },
}

impl Scale {
    pub fn linear(domain: [f64; 2], range: [f64; 2]) -> Self {
        Scale::Linear { domain, range }
    }

    pub fn point(domain: Vec<String>, range: [f64; 2]) -> Self {
        Scale::Point { domain, range }
    }

    /// Map a value to its offset.
    ///
    /// Returns `None` for values the scale cannot place: text on a linear
    /// scale or a category outside a point scale's domain.
    pub fn apply(&self, value: &Value) -> Option<f64> {
        match self {
            Scale::Linear { domain, range } => {
                let x = value.as_f64()?;
                let spread = domain[1] - domain[0];
                if spread == 0.0 || !spread.is_finite() {
                    // Collapse a degenerate domain onto the range midpoint
                    return Some((range[0] + range[1]) / 2.0);
                }
                Some(range[0] + (x - domain[0]) / spread * (range[1] - range[0]))
            }
            Scale::Point { domain, range } => {
                let key = value.to_string();
                let index = domain.iter().position(|d| *d == key)?;
                Some(point_offset(index, domain.len(), *range))
            }
        }
    }

    /// Ticks for an axis; `count` is a hint for continuous scales
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        match self {
            Scale::Linear { domain, .. } => linear_ticks(domain[0], domain[1], count)
                .into_iter()
                .filter_map(|v| {
                    let value = Value::Number(v);
                    self.apply(&value).map(|offset| Tick { value, offset })
                })
                .collect(),
            Scale::Point { domain, range } => domain
                .iter()
                .enumerate()
                .map(|(i, d)| Tick {
                    value: Value::Text(d.clone()),
                    offset: point_offset(i, domain.len(), *range),
                })
                .collect(),
        }
    }

    pub fn range(&self) -> [f64; 2] {
        match self {
            Scale::Linear { range, .. } | Scale::Point { range, .. } => *range,
        }
    }
}

/// Offset of the `index`-th of `count` evenly spaced points
pub fn point_offset(index: usize, count: usize, range: [f64; 2]) -> f64 {
    if count <= 1 {
        return (range[0] + range[1]) / 2.0;
    }
    let step = (range[1] - range[0]) / (count - 1) as f64;
    range[0] + step * index as f64
}

/// "Nice" tick values covering `[a, b]`, stepping by 1, 2 or 5 times a power of ten
pub fn linear_ticks(a: f64, b: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    if hi - lo == 0.0 || count == 0 {
        return vec![lo];
    }

    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        let step = 10f64.powf(power) * factor;
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        // Divide by the inverse step so decimal ticks stay exact
        let inverse = 10f64.powf(-power) / factor;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    }
}
