//! Angle-mode aware trigonometry.
//!
//! Circular functions convert their argument (or, for the inverses, their
//! result) through the active [`AngleMode`]. Hyperbolic functions take a plain
//! real argument and never convert.

use crate::settings::AngleMode;
use std::f64::consts::PI;

pub fn to_radians(angle: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Degree => angle * PI / 180.0,
        AngleMode::Grad => angle * PI / 200.0,
        AngleMode::Radian => angle,
    }
}

pub fn from_radians(radians: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Degree => radians * 180.0 / PI,
        AngleMode::Grad => radians * 200.0 / PI,
        AngleMode::Radian => radians,
    }
}

pub fn sin(x: f64, mode: AngleMode) -> f64 {
    to_radians(x, mode).sin()
}

pub fn cos(x: f64, mode: AngleMode) -> f64 {
    to_radians(x, mode).cos()
}

pub fn tan(x: f64, mode: AngleMode) -> f64 {
    to_radians(x, mode).tan()
}

pub fn asin(x: f64, mode: AngleMode) -> f64 {
    from_radians(x.asin(), mode)
}

pub fn acos(x: f64, mode: AngleMode) -> f64 {
    from_radians(x.acos(), mode)
}

pub fn atan(x: f64, mode: AngleMode) -> f64 {
    from_radians(x.atan(), mode)
}

pub fn sec(x: f64, mode: AngleMode) -> f64 {
    1.0 / cos(x, mode)
}

pub fn csc(x: f64, mode: AngleMode) -> f64 {
    1.0 / sin(x, mode)
}

pub fn cot(x: f64, mode: AngleMode) -> f64 {
    1.0 / tan(x, mode)
}

pub fn sinh(x: f64) -> f64 {
    x.sinh()
}

pub fn cosh(x: f64) -> f64 {
    x.cosh()
}

pub fn tanh(x: f64) -> f64 {
    x.tanh()
}
