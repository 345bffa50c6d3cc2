use itertools::Itertools;

use corrguess::summary::Bounds;

pub const TICK_COUNT: usize = 6;

/// Evenly spaced axis ticks with one-decimal labels
pub fn axis_ticks(range: [f64; 2]) -> Vec<(f64, String)> {
    Bounds::ticks(range, TICK_COUNT)
        .into_iter()
        .map(|v| (v, format_label(v)))
        .collect()
}

/// One-decimal label; avoids printing "-0.0"
pub fn format_label(val: f64) -> String {
    let label = format!("{val:.1}");
    if label == "-0.0" {
        "0.0".to_string()
    } else {
        label
    }
}

/// Consecutive vertex pairs of a polyline, ready to draw as segments
pub fn segments(vertices: &[(f64, f64)]) -> Vec<((f64, f64), (f64, f64))> {
    vertices.iter().copied().tuple_windows().collect()
}

/// Map a correlation in `[-1, 1]` onto a gauge ratio in `[0, 1]`
pub fn gauge_ratio(r: f64) -> f64 {
    ((r.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_ticks() {
        let ticks = axis_ticks([-1.0, 1.5]);
        assert_eq!(ticks.len(), TICK_COUNT);
        assert_eq!(ticks[0], (-1.0, "-1.0".to_string()));
        assert_eq!(ticks[5].1, "1.5");
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1.0");
        assert_eq!(format_label(1.2345), "1.2");
        assert_eq!(format_label(-0.04), "0.0");
    }

    #[test]
    fn test_segments_close_the_loop() {
        let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)];
        let segs = segments(&square);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], ((1.0, 1.0), (0.0, 0.0)));
        assert!(segments(&[(0.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_gauge_ratio() {
        assert_eq!(gauge_ratio(-1.0), 0.0);
        assert_eq!(gauge_ratio(0.0), 0.5);
        assert_eq!(gauge_ratio(1.0), 1.0);
        assert_eq!(gauge_ratio(7.0), 1.0);
    }
}
