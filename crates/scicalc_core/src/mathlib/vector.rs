use crate::error::{CalcError, CalcResult};
use crate::mathlib::trig::{from_radians, to_radians};
use crate::settings::AngleMode;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

fn same_length(a: &[f64], b: &[f64]) -> CalcResult<()> {
    if a.len() != b.len() {
        return Err(CalcError::Dimension(format!(
            "vectors have lengths {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

pub fn dot(a: &[f64], b: &[f64]) -> CalcResult<f64> {
    same_length(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

pub fn cross(a: &[f64], b: &[f64]) -> CalcResult<[f64; 3]> {
    if a.len() != 3 || b.len() != 3 {
        return Err(CalcError::Dimension("cross product needs two 3-vectors".into()));
    }
    Ok([
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

pub fn magnitude(a: &[f64]) -> f64 {
    a.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Angle between two vectors, reported in the given angle mode.
/// NaN when either vector has zero length.
pub fn angle_between(a: &[f64], b: &[f64], mode: AngleMode) -> CalcResult<f64> {
    let denom = magnitude(a) * magnitude(b);
    if denom == 0.0 {
        return Ok(f64::NAN);
    }
    // Clamp against rounding just outside [-1, 1].
    let cosine = (dot(a, b)? / denom).clamp(-1.0, 1.0);
    Ok(from_radians(cosine.acos(), mode))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub r: f64,
    pub theta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangular {
    pub x: f64,
    pub y: f64,
}

pub fn polar_to_rectangular(polar: Polar, mode: AngleMode) -> Rectangular {
    let z = Complex::from_polar(polar.r, to_radians(polar.theta, mode));
    Rectangular { x: z.re, y: z.im }
}

pub fn rectangular_to_polar(rect: Rectangular, mode: AngleMode) -> Polar {
    let (r, theta) = Complex::new(rect.x, rect.y).to_polar();
    Polar {
        r,
        theta: from_radians(theta, mode),
    }
}
