//! Finite-difference calculus over any [`RealFunction`].
//!
//! The step sizes and tolerances below are fixed heuristics. Scans sample at
//! `start + i * step` for `i = 0, 1, ...` while the sample stays below `end`,
//! and drop samples that come back NaN.

use crate::error::CalcError;
use crate::mathlib::number_theory::{combination, factorial};
use crate::settings::TaylorScheme;
use crate::traits::RealFunction;
use serde::Serialize;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_DERIVATIVE_STEP: f64 = 1e-4;
pub const DEFAULT_INTERVALS: usize = 1000;
pub const DEFAULT_SCAN_STEP: f64 = 0.1;

/// Offset of the two probes around a limit point.
pub const LIMIT_OFFSET: f64 = 1e-4;
/// Probes closer than this agree on a two-sided limit.
pub const LIMIT_TOLERANCE: f64 = 1e-3;
pub const TAYLOR_STEP: f64 = 1e-3;
/// `|f'|` below this flags a critical point.
pub const CRITICAL_TOLERANCE: f64 = 0.01;
pub const INFLECTION_STEP: f64 = 1e-3;
/// `|f''|` below this flags an inflection point.
pub const INFLECTION_TOLERANCE: f64 = 0.01;

/// Central difference `(f(x+h) - f(x-h)) / 2h`.
pub fn differentiate<F: RealFunction + ?Sized>(f: &F, x: f64, h: f64) -> f64 {
    (f.eval(x + h) - f.eval(x - h)) / (2.0 * h)
}

/// Second central difference `(f(x+h) - 2f(x) + f(x-h)) / h²`.
pub fn second_derivative<F: RealFunction + ?Sized>(f: &F, x: f64, h: f64) -> f64 {
    (f.eval(x + h) - 2.0 * f.eval(x) + f.eval(x - h)) / (h * h)
}

/// Composite Simpson's rule over `n` subintervals.
///
/// `n` must be even; an odd count is bumped by one.
pub fn integrate<F: RealFunction + ?Sized>(f: &F, a: f64, b: f64, n: usize) -> f64 {
    let n = even_intervals(n);
    let h = (b - a) / n as f64;
    let mut sum = f.eval(a) + f.eval(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f.eval(a + h * i as f64);
    }
    sum * h / 3.0
}

/// At least two, and even. `usize::MAX` steps down instead of overflowing.
fn even_intervals(n: usize) -> usize {
    let n = n.max(2);
    if n % 2 == 0 {
        return n;
    }
    let even = n.checked_add(1).unwrap_or(n - 1);
    warn!(n, "Simpson's rule needs an even interval count; using {even}");
    even
}

/// Composite trapezoid rule over `n` subintervals.
pub fn integrate_trapezoid<F: RealFunction + ?Sized>(f: &F, a: f64, b: f64, n: usize) -> f64 {
    let n = n.max(1);
    let h = (b - a) / n as f64;
    let mut sum = 0.5 * (f.eval(a) + f.eval(b));
    for i in 1..n {
        sum += f.eval(a + h * i as f64);
    }
    sum * h
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitDirection {
    #[default]
    Both,
    Left,
    Right,
}

impl FromStr for LimitDirection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" | "" => Ok(LimitDirection::Both),
            "left" | "-" => Ok(LimitDirection::Left),
            "right" | "+" => Ok(LimitDirection::Right),
            other => Err(CalcError::Parse(format!("unknown limit direction '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    Value(f64),
    DoesNotExist,
}

impl Limit {
    fn from_probe(value: f64) -> Self {
        if value.is_nan() {
            Limit::DoesNotExist
        } else {
            Limit::Value(value)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Limit::Value(v) => Some(v),
            Limit::DoesNotExist => None,
        }
    }
}

/// Probes `point ± LIMIT_OFFSET`.
///
/// The two-sided limit exists when the probes agree within
/// [`LIMIT_TOLERANCE`], and is reported as their average.
pub fn limit<F: RealFunction + ?Sized>(f: &F, point: f64, direction: LimitDirection) -> Limit {
    let left = || f.eval(point - LIMIT_OFFSET);
    let right = || f.eval(point + LIMIT_OFFSET);
    match direction {
        LimitDirection::Left => Limit::from_probe(left()),
        LimitDirection::Right => Limit::from_probe(right()),
        LimitDirection::Both => {
            let (l, r) = (left(), right());
            if (l - r).abs() < LIMIT_TOLERANCE {
                Limit::Value((l + r) / 2.0)
            } else {
                Limit::DoesNotExist
            }
        }
    }
}

fn nth_derivative<F: RealFunction + ?Sized>(
    f: &F,
    center: f64,
    order: usize,
    scheme: TaylorScheme,
) -> f64 {
    match (order, scheme) {
        (0, _) => f.eval(center),
        (_, TaylorScheme::RepeatedFirstDifference) => differentiate(f, center, TAYLOR_STEP),
        (n, TaylorScheme::IteratedCentralDifference) => {
            // Δⁿf(c) = Σ (-1)^k C(n,k) f(c + (n - 2k)h), over (2h)ⁿ.
            let h = TAYLOR_STEP;
            let sum: f64 = (0..=n)
                .map(|k| {
                    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                    let offset = (n as f64 - 2.0 * k as f64) * h;
                    sign * combination(n as f64, k as f64) * f.eval(center + offset)
                })
                .sum();
            sum / (2.0 * h).powi(n as i32)
        }
    }
}

/// Coefficients `f⁽ⁿ⁾(center) / n!` for `n = 0..terms`.
pub fn taylor_coefficients<F: RealFunction + ?Sized>(
    f: &F,
    center: f64,
    terms: usize,
    scheme: TaylorScheme,
) -> Vec<f64> {
    (0..terms)
        .map(|n| nth_derivative(f, center, n, scheme) / factorial(n as f64))
        .collect()
}

/// Evaluates the Taylor polynomial about `center` at `at`.
pub fn taylor_series<F: RealFunction + ?Sized>(
    f: &F,
    center: f64,
    terms: usize,
    at: f64,
    scheme: TaylorScheme,
) -> f64 {
    let dx = at - center;
    taylor_coefficients(f, center, terms, scheme)
        .iter()
        .enumerate()
        .map(|(n, c)| c * dx.powi(n as i32))
        .sum()
}

/// Sample positions of a scan. Empty for a non-positive or non-finite step.
pub fn scan_points(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let valid = step > 0.0 && step.is_finite() && start.is_finite() && end.is_finite();
    (0usize..)
        .map(move |i| start + step * i as f64)
        .take_while(move |x| valid && *x < end)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalPoint {
    pub x: f64,
    pub y: f64,
    pub derivative: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InflectionPoint {
    pub x: f64,
    pub y: f64,
    pub second_derivative: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extrema {
    pub min: SamplePoint,
    pub max: SamplePoint,
}

/// Samples where `|f'| < CRITICAL_TOLERANCE`.
pub fn find_critical_points<F: RealFunction + ?Sized>(
    f: &F,
    start: f64,
    end: f64,
    step: f64,
) -> Vec<CriticalPoint> {
    scan_points(start, end, step)
        .filter_map(|x| {
            let derivative = differentiate(f, x, DEFAULT_DERIVATIVE_STEP);
            if derivative.abs() >= CRITICAL_TOLERANCE || derivative.is_nan() {
                return None;
            }
            let y = f.eval(x);
            (!y.is_nan()).then_some(CriticalPoint { x, y, derivative })
        })
        .collect()
}

/// Running minimum and maximum over the scan. `None` when no sample is a
/// number. Ties keep the earliest sample.
pub fn find_extrema<F: RealFunction + ?Sized>(
    f: &F,
    start: f64,
    end: f64,
    step: f64,
) -> Option<Extrema> {
    let mut samples = scan_points(start, end, step)
        .map(|x| SamplePoint { x, y: f.eval(x) })
        .filter(|p| !p.y.is_nan());
    let first = samples.next()?;
    Some(samples.fold(
        Extrema {
            min: first,
            max: first,
        },
        |mut acc, p| {
            if p.y < acc.min.y {
                acc.min = p;
            }
            if p.y > acc.max.y {
                acc.max = p;
            }
            acc
        },
    ))
}

/// Samples where `|f''| < INFLECTION_TOLERANCE`.
pub fn find_inflection_points<F: RealFunction + ?Sized>(
    f: &F,
    start: f64,
    end: f64,
    step: f64,
) -> Vec<InflectionPoint> {
    scan_points(start, end, step)
        .filter_map(|x| {
            let second = second_derivative(f, x, INFLECTION_STEP);
            if second.abs() >= INFLECTION_TOLERANCE || second.is_nan() {
                return None;
            }
            let y = f.eval(x);
            (!y.is_nan()).then_some(InflectionPoint {
                x,
                y,
                second_derivative: second,
            })
        })
        .collect()
}
