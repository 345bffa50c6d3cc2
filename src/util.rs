pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Mean squared deviation, dividing by `n`.
pub fn population_variance(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance)
        }
        _ => None,
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Round to `digits` decimal places using the exact decimal value of
/// `value`, so `20.075` (stored as 20.07499...) rounds down. Exact halves
/// round away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // An exact half at `digits` places is an odd multiple of 2^-(digits+1);
    // scaling by a power of ten is exact for those.
    let halves = value * 2f64.powi(digits as i32 + 1);
    if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        let factor = 10f64.powi(digits as i32);
        return (value * factor).round() / factor;
    }
    format!("{:.*}", digits as usize, value)
        .parse()
        .unwrap_or(value)
}
