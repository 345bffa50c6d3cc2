//! Per-axis summary statistics and plot bounds for a point cloud.

use crate::dataset::Point;
use crate::util::{mean, population_variance};

/// Variance floor applied when a spread comes out as exactly zero.
pub const VARIANCE_FLOOR: f64 = 1e-6;

/// Fraction of the data range added on each side of the plot domain.
pub const DOMAIN_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStatistics {
    pub mean: f64,
    pub std: f64,
}

impl AxisStatistics {
    /// Population statistics of `values`. A zero variance (including an
    /// empty slice) is floored at [`VARIANCE_FLOOR`] so `std` is never 0.
    pub fn of(values: &[f64]) -> Self {
        let mean = mean(values).unwrap_or(0.0);
        let variance = population_variance(values).unwrap_or(0.0);
        let variance = if variance == 0.0 {
            VARIANCE_FLOOR
        } else {
            variance
        };
        Self {
            mean,
            std: variance.sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub x: AxisStatistics,
    pub y: AxisStatistics,
}

impl Summary {
    pub fn compute(points: &[Point]) -> Self {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().map(|p| (p.x, p.y)).unzip();
        Self {
            x: AxisStatistics::of(&xs),
            y: AxisStatistics::of(&ys),
        }
    }

    pub fn mean_x(&self) -> f64 {
        self.x.mean
    }

    pub fn mean_y(&self) -> f64 {
        self.y.mean
    }

    pub fn std_x(&self) -> f64 {
        self.x.std
    }

    pub fn std_y(&self) -> f64 {
        self.y.std
    }
}

/// Pearson correlation actually realized by `points`.
///
/// Returns `None` for fewer than two points or when either axis has no
/// spread.
pub fn sample_correlation(points: &[Point]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let my = points.iter().map(|p| p.y).sum::<f64>() / n;

    let (sxy, sxx, syy) = points.iter().fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), p| {
        let dx = p.x - mx;
        let dy = p.y - my;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Axis-aligned plotting domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Tight min/max box around `points`, or `None` when empty.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.iter().fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Grow each side by `fraction` of the range. A zero range counts as 1.
    pub fn padded(&self, fraction: f64) -> Self {
        let range_x = nonzero_range(self.max_x - self.min_x);
        let range_y = nonzero_range(self.max_y - self.min_y);
        Self {
            min_x: self.min_x - range_x * fraction,
            max_x: self.max_x + range_x * fraction,
            min_y: self.min_y - range_y * fraction,
            max_y: self.max_y + range_y * fraction,
        }
    }

    pub fn x(&self) -> [f64; 2] {
        [self.min_x, self.max_x]
    }

    pub fn y(&self) -> [f64; 2] {
        [self.min_y, self.max_y]
    }

    /// `count` evenly spaced values from min to max along one axis.
    pub fn ticks(range: [f64; 2], count: usize) -> Vec<f64> {
        match count {
            0 => vec![],
            1 => vec![range[0]],
            _ => {
                let span = range[1] - range[0];
                (0..count)
                    .map(|i| range[0] + span * i as f64 / (count - 1) as f64)
                    .collect()
            }
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
        }
    }
}

fn nonzero_range(range: f64) -> f64 {
    if range == 0.0 {
        1.0
    } else {
        range
    }
}
