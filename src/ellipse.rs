//! Covariance-ellipse outlines used as a visual correlation hint.
//!
//! The outline is the unit circle pushed through the Cholesky factor of the
//! 2x2 covariance matrix, scaled and re-centered on the means. The result is
//! an ordered, closed vertex list in data space; drawing it is up to the
//! caller.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::summary::Summary;

/// Correlation is clamped to `[-R_CLAMP, R_CLAMP]` so the matrix stays
/// positive-definite.
pub const R_CLAMP: f64 = 0.999;

/// Floor for each standard deviation before building the matrix.
const SIGMA_FLOOR: f64 = 1e-6;

/// Floor for the second Cholesky pivot. Rounding can push the radicand
/// slightly negative when `|r|` is near 1.
const PIVOT_FLOOR: f64 = 1e-9;

pub const DEFAULT_SCALE: f64 = 1.5;
pub const DEFAULT_STEPS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseSettings {
    /// Contour radius in standard deviations.
    pub scale: f64,
    /// Segments around the outline; the polygon has `steps + 1` vertices.
    pub steps: usize,
}

impl Default for EllipseSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            steps: DEFAULT_STEPS,
        }
    }
}

/// Lower-triangular factor `L` with `L * L^T = Sigma`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cholesky {
    a11: f64,
    a21: f64,
    a22: f64,
}

impl Cholesky {
    fn of(std_x: f64, std_y: f64, r: f64) -> Self {
        let sigma_x = std_x.max(SIGMA_FLOOR);
        let sigma_y = std_y.max(SIGMA_FLOOR);
        let rho = r.clamp(-R_CLAMP, R_CLAMP);

        let cov_xx = sigma_x * sigma_x;
        let cov_yy = sigma_y * sigma_y;
        let cov_xy = rho * sigma_x * sigma_y;

        let a11 = cov_xx.sqrt();
        let a21 = cov_xy / a11;
        let a22 = (cov_yy - a21 * a21).max(PIVOT_FLOOR).sqrt();
        Self { a11, a21, a22 }
    }
}

/// Closed outline around `(mean_x, mean_y)`; the first vertex is repeated
/// at the end. `steps == 0` yields the single point at angle zero.
pub fn ellipse_polygon(
    mean_x: f64,
    mean_y: f64,
    std_x: f64,
    std_y: f64,
    r: f64,
    scale: f64,
    steps: usize,
) -> Vec<(f64, f64)> {
    let l = Cholesky::of(std_x, std_y, r);
    if steps == 0 {
        return vec![(mean_x + scale * l.a11, mean_y + scale * l.a21)];
    }

    let mut vertices: Vec<(f64, f64)> = (0..steps)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / steps as f64;
            let (sin, cos) = theta.sin_cos();
            let ex = scale * (l.a11 * cos);
            let ey = scale * (l.a21 * cos + l.a22 * sin);
            (mean_x + ex, mean_y + ey)
        })
        .collect();
    // Angle 2*pi lands back on angle 0 only up to rounding; reuse the exact
    // first vertex so the outline is closed.
    vertices.push(vertices[0]);
    vertices
}

/// Outline for a correlation guess (or the truth) over a summarized cloud.
pub fn ellipse_for(summary: &Summary, r: f64, settings: EllipseSettings) -> Vec<(f64, f64)> {
    ellipse_polygon(
        summary.mean_x(),
        summary.mean_y(),
        summary.std_x(),
        summary.std_y(),
        r,
        settings.scale,
        settings.steps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn closed_with_steps_plus_one_vertices() {
        let poly = ellipse_polygon(1.0, -2.0, 1.5, 0.5, 0.4, 1.5, 80);
        assert_eq!(poly.len(), 81);
        assert_eq!(poly.first(), poly.last());
    }

    #[test]
    fn uncorrelated_unit_is_a_circle() {
        let poly = ellipse_polygon(0.0, 0.0, 1.0, 1.0, 0.0, 2.0, 40);
        for &(x, y) in &poly {
            assert!(close((x * x + y * y).sqrt(), 2.0));
        }
    }

    #[test]
    fn first_vertex_is_on_the_x_semi_axis() {
        let poly = ellipse_polygon(3.0, 4.0, 2.0, 1.0, 0.0, 1.5, 8);
        assert!(close(poly[0].0, 3.0 + 1.5 * 2.0));
        assert!(close(poly[0].1, 4.0));
        // quarter turn goes straight up by scale * std_y
        assert!(close(poly[2].0, 3.0));
        assert!(close(poly[2].1, 4.0 + 1.5));
    }

    #[test]
    fn positive_r_tilts_up_right() {
        let poly = ellipse_polygon(0.0, 0.0, 1.0, 1.0, 0.8, 1.0, 8);
        // at theta = 0 the y offset is a21 = r * std_y
        assert!(close(poly[0].1, 0.8));
        let neg = ellipse_polygon(0.0, 0.0, 1.0, 1.0, -0.8, 1.0, 8);
        assert!(close(neg[0].1, -0.8));
    }

    #[test]
    fn vertices_lie_on_one_mahalanobis_contour() {
        let (sx, sy, r, k) = (2.0, 0.5, -0.6, 1.5);
        let det = sx * sx * sy * sy * (1.0 - r * r);
        for &(x, y) in &ellipse_polygon(0.0, 0.0, sx, sy, r, k, 64) {
            // (x, y) Sigma^-1 (x, y)^T
            let d2 = (sy * sy * x * x - 2.0 * r * sx * sy * x * y + sx * sx * y * y) / det;
            assert!((d2 - k * k).abs() < 1e-9, "d2 = {d2}");
        }
    }

    #[test]
    fn extreme_correlation_stays_finite() {
        for r in [-1.0, -0.99999, 0.99999, 1.0, 5.0] {
            let poly = ellipse_polygon(0.0, 0.0, 1.0, 1.0, r, 1.5, 80);
            assert!(poly.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
        }
    }

    #[test]
    fn degenerate_spread_stays_finite() {
        let poly = ellipse_polygon(0.0, 0.0, 0.0, 0.0, 0.5, 1.5, 16);
        assert!(poly.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn zero_steps_is_a_single_vertex() {
        assert_eq!(ellipse_polygon(0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0).len(), 1);
    }

    #[test]
    fn ellipse_for_uses_summary() {
        let summary = Summary::compute(&[
            crate::dataset::Point::new(0.0, 0.0),
            crate::dataset::Point::new(2.0, 2.0),
        ]);
        let poly = ellipse_for(&summary, 0.0, EllipseSettings::default());
        assert_eq!(poly.len(), DEFAULT_STEPS + 1);
        assert!(close(poly[0].0, 1.0 + DEFAULT_SCALE));
        assert!(close(poly[0].1, 1.0));
    }
}
