//! Numeric methods on the session's expressions.

use crate::calculator::WasmCalculator;
use crate::js_error;
use anyhow::Context;
use js_sys::Float64Array;
use scicalc_core::calculus::LimitDirection;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
impl WasmCalculator {
    pub fn differentiate(&self, expr: &str, variable: &str, point: f64) -> f64 {
        self.inner.differentiate(expr, variable, point)
    }

    pub fn integrate(&self, expr: &str, variable: &str, a: f64, b: f64) -> f64 {
        self.inner.integrate(expr, variable, a, b)
    }

    pub fn integrate_trapezoid(&self, expr: &str, variable: &str, a: f64, b: f64) -> f64 {
        self.inner.integrate_trapezoid(expr, variable, a, b)
    }

    /// `direction` is `"both"`, `"left"` or `"right"`. Returns `undefined`
    /// when the limit does not exist.
    pub fn limit(
        &self,
        expr: &str,
        variable: &str,
        point: f64,
        direction: &str,
    ) -> Result<Option<f64>, JsValue> {
        let direction: LimitDirection = direction
            .parse()
            .context("limit")
            .map_err(js_error)?;
        Ok(self.inner.limit(expr, variable, point, direction).value())
    }

    pub fn taylor_series(&self, expr: &str, variable: &str, center: f64, at: f64) -> f64 {
        self.inner.taylor_series(expr, variable, center, at)
    }

    pub fn taylor_coefficients(&self, expr: &str, variable: &str, center: f64) -> Float64Array {
        let coefficients = self.inner.taylor_coefficients(expr, variable, center);
        Float64Array::from(coefficients.as_slice())
    }

    /// `[{ x, y, derivative }, ...]`
    pub fn find_critical_points(
        &self,
        expr: &str,
        variable: &str,
        start: f64,
        end: f64,
    ) -> Result<JsValue, JsValue> {
        serialize(&self.inner.find_critical_points(expr, variable, start, end))
    }

    /// `{ min: { x, y }, max: { x, y } }`, or `null` when every sample failed.
    pub fn find_extrema(
        &self,
        expr: &str,
        variable: &str,
        start: f64,
        end: f64,
    ) -> Result<JsValue, JsValue> {
        match self.inner.find_extrema(expr, variable, start, end) {
            Some(extrema) => serialize(&extrema),
            None => Ok(JsValue::NULL),
        }
    }

    /// `[{ x, y, second_derivative }, ...]`
    pub fn find_inflection_points(
        &self,
        expr: &str,
        variable: &str,
        start: f64,
        end: f64,
    ) -> Result<JsValue, JsValue> {
        serialize(&self.inner.find_inflection_points(expr, variable, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scicalc_core::CalculatorSettings;

    fn calc() -> WasmCalculator {
        WasmCalculator::from_settings(CalculatorSettings::default())
    }

    #[test]
    fn scalar_routines_pass_through() {
        let calc = calc();
        assert!((calc.differentiate("x^2", "x", 3.0) - 6.0).abs() < 1e-3);
        assert!((calc.integrate("x^2", "x", 0.0, 1.0) - 1.0 / 3.0).abs() < 1e-4);
        assert!((calc.integrate_trapezoid("x", "x", 0.0, 2.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn limit_reports_missing_limits_as_none() {
        let calc = calc();
        let value = calc
            .limit("sin(x)/x", "x", 0.0, "both")
            .expect("known direction")
            .expect("limit exists");
        assert!((value - 1.0).abs() < 1e-6);
        assert_eq!(calc.limit("abs(x)/x", "x", 0.0, "both").expect("known"), None);
        assert_eq!(
            calc.limit("abs(x)/x", "x", 0.0, "right").expect("known"),
            Some(1.0)
        );
    }
}
