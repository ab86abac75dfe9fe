//! Stateless helpers exported as free functions.

use crate::js_error;
use anyhow::Context;
use js_sys::Float64Array;
use scicalc_core::mathlib::logic::LogicOp;
use scicalc_core::mathlib::vector::{Polar, Rectangular};
use scicalc_core::mathlib::{algebra, constants, convert, number_theory, stats, vector};
use scicalc_core::settings::AngleMode;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// `{ x1, x2, discriminant }`; the roots are NaN when the discriminant is negative.
#[wasm_bindgen]
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Result<JsValue, JsValue> {
    to_value(&algebra::solve_quadratic(a, b, c))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
pub fn is_prime(n: f64) -> bool {
    number_theory::is_prime(n)
}

#[wasm_bindgen]
pub fn gcd(a: f64, b: f64) -> f64 {
    number_theory::gcd(a, b)
}

#[wasm_bindgen]
pub fn lcm(a: f64, b: f64) -> f64 {
    number_theory::lcm(a, b)
}

#[wasm_bindgen]
pub fn convert_length(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert::convert_length(value, from, to)
        .context("convert_length")
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn convert_mass(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert::convert_mass(value, from, to)
        .context("convert_mass")
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn convert_time(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert::convert_time(value, from, to)
        .context("convert_time")
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert::convert_temperature(value, from, to)
        .context("convert_temperature")
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn to_base(value: f64, radix: u32) -> Result<String, JsValue> {
    convert::to_base(value, radix)
        .context("to_base")
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn from_base(text: &str, radix: u32) -> Result<f64, JsValue> {
    convert::from_base(text, radix)
        .context("from_base")
        .map_err(js_error)
}

/// `{ count, mean, median, mode, variance, std_dev, min, max }`
#[wasm_bindgen]
pub fn statistics(values: Vec<f64>) -> Result<JsValue, JsValue> {
    to_value(&stats::summarize(&values))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    stats::normal_cdf(x, mean, std_dev)
}

#[wasm_bindgen]
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    stats::normal_pdf(x, mean, std_dev)
}

/// Named mathematical or physical constant, `undefined` if unknown.
#[wasm_bindgen]
pub fn constant(name: &str) -> Option<f64> {
    constants::lookup(name)
}

/// Bitwise `and`/`or`/`xor`/`nand`/`nor`/`xnor` on the integer parts.
#[wasm_bindgen]
pub fn bitwise(op: &str, a: f64, b: f64) -> Result<f64, JsValue> {
    op.parse::<LogicOp>()
        .and_then(|op| op.apply_bitwise(a, b))
        .context("bitwise")
        .map_err(js_error)
}

/// `[x, y]` for a polar pair whose angle is read in `angle_mode`.
#[wasm_bindgen]
pub fn polar_to_rectangular(r: f64, theta: f64, angle_mode: &str) -> Result<Float64Array, JsValue> {
    let mode: AngleMode = angle_mode
        .parse()
        .context("polar_to_rectangular")
        .map_err(js_error)?;
    let rect = vector::polar_to_rectangular(Polar { r, theta }, mode);
    Ok(Float64Array::from(&[rect.x, rect.y][..]))
}

/// `[r, theta]` with the angle reported in `angle_mode`.
#[wasm_bindgen]
pub fn rectangular_to_polar(x: f64, y: f64, angle_mode: &str) -> Result<Float64Array, JsValue> {
    let mode: AngleMode = angle_mode
        .parse()
        .context("rectangular_to_polar")
        .map_err(js_error)?;
    let polar = vector::rectangular_to_polar(Rectangular { x, y }, mode);
    Ok(Float64Array::from(&[polar.r, polar.theta][..]))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn failures_become_js_errors() {
        assert!(convert_mass(1.0, "stone", "kg").is_err());
        assert!(to_base(1.5, 2).is_err());
        assert!(bitwise("implies", 1.0, 0.0).is_err());
        assert!(polar_to_rectangular(1.0, 0.0, "turns").is_err());
    }

    #[wasm_bindgen_test]
    fn structured_results_serialize() {
        assert!(solve_quadratic(1.0, -3.0, 2.0).expect("serializes").is_object());
        assert!(statistics(vec![1.0, 2.0, 3.0]).expect("serializes").is_object());
        assert_eq!(polar_to_rectangular(1.0, 0.0, "deg").expect("mode").length(), 2);
        let polar = rectangular_to_polar(0.0, 1.0, "deg").expect("mode").to_vec();
        assert!((polar[1] - 90.0).abs() < 1e-9);
    }
}
