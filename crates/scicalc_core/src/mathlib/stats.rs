use crate::traits::Scalar;
use serde::Serialize;
use std::cmp::Ordering;

fn cast<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

fn sorted<T: Scalar>(values: &[T]) -> Vec<T> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

pub fn mean<T: Scalar>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / cast(values.len() as f64)
}

pub fn median<T: Scalar>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / cast(2.0)
    }
}

/// All values sharing the highest frequency, ascending.
pub fn mode<T: Scalar>(values: &[T]) -> Vec<T> {
    let sorted = sorted(values);
    let mut best = 0usize;
    let mut modes = Vec::new();
    let mut idx = 0;
    while idx < sorted.len() {
        let value = sorted[idx];
        let mut run = 1;
        while idx + run < sorted.len() && sorted[idx + run] == value {
            run += 1;
        }
        match run.cmp(&best) {
            Ordering::Greater => {
                best = run;
                modes.clear();
                modes.push(value);
            }
            Ordering::Equal => modes.push(value),
            Ordering::Less => {}
        }
        idx += run;
    }
    modes
}

/// Population variance.
pub fn variance<T: Scalar>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let avg = mean(values);
    let sum = values
        .iter()
        .fold(T::zero(), |acc, &v| acc + (v - avg) * (v - avg));
    sum / cast(values.len() as f64)
}

pub fn std_dev<T: Scalar>(values: &[T]) -> T {
    variance(values).sqrt()
}

/// NaN when the lengths differ or the weights sum to zero.
pub fn weighted_mean<T: Scalar>(values: &[T], weights: &[T]) -> T {
    if values.len() != weights.len() || values.is_empty() {
        return T::nan();
    }
    let total_weight = weights.iter().fold(T::zero(), |acc, &w| acc + w);
    if total_weight == T::zero() {
        return T::nan();
    }
    let weighted = values
        .iter()
        .zip(weights)
        .fold(T::zero(), |acc, (&v, &w)| acc + v * w);
    weighted / total_weight
}

/// Abramowitz–Stegun 7.1.26, absolute error below 1.5e-7.
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return f64::NAN;
    }
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return f64::NAN;
    }
    0.5 * (1.0 + erf((x - mean) / (std_dev * std::f64::consts::SQRT_2)))
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: Vec<f64>,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub fn summarize(values: &[f64]) -> Summary {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    Summary {
        count: values.len(),
        mean: mean(values),
        median: median(values),
        mode: mode(values),
        variance: variance(values),
        std_dev: std_dev(values),
        min: if values.is_empty() { f64::NAN } else { min },
        max: if values.is_empty() { f64::NAN } else { max },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn central_tendency() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&data), 5.0);
        assert_eq!(median(&data), 4.5);
        assert_eq!(mode(&data), vec![4.0]);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn spread_is_population_based() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(variance(&data), 4.0);
        assert_eq!(std_dev(&data), 2.0);
    }

    #[test]
    fn empty_input_is_nan() {
        let empty: [f64; 0] = [];
        assert!(mean(&empty).is_nan());
        assert!(median(&empty).is_nan());
        assert!(mode(&empty).is_empty());
        assert!(summarize(&empty).min.is_nan());
    }

    #[test]
    fn multimodal_data_reports_every_mode() {
        assert_eq!(mode(&[1.0, 1.0, 2.0, 2.0, 3.0]), vec![1.0, 2.0]);
    }

    #[test]
    fn weighted_mean_respects_weights() {
        assert_eq!(weighted_mean(&[1.0, 3.0], &[3.0, 1.0]), 1.5);
        assert!(weighted_mean(&[1.0_f64], &[1.0, 2.0]).is_nan());
        assert!(weighted_mean(&[1.0_f64, 2.0], &[0.0, 0.0]).is_nan());
    }

    #[test]
    fn works_for_f32() {
        let data = [1.0_f32, 2.0, 3.0];
        assert_eq!(mean(&data), 2.0_f32);
    }

    #[test]
    fn normal_distribution() {
        assert!((normal_cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96, 0.0, 1.0) - 0.975).abs() < 1e-3);
        assert!((normal_pdf(0.0, 0.0, 1.0) - 0.398_942_280_4).abs() < 1e-9);
        assert!(normal_pdf(0.0, 0.0, 0.0).is_nan());
        assert!((erf(1.0) - 0.842_700_79).abs() < 2e-7);
        assert!((erf(-1.0) + 0.842_700_79).abs() < 2e-7);
    }
}
