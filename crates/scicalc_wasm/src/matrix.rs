//! Matrix and vector operations on bracketed text literals.
//!
//! Literal elements are expressions evaluated in the session, so `[[A, 2], [π, 1]]`
//! sees stored variables and the angle mode.

use crate::calculator::WasmCalculator;
use crate::js_error;
use anyhow::{Context, Result};
use js_sys::Float64Array;
use nalgebra::DMatrix;
use scicalc_core::mathlib::{matrix, vector};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

type Rows = Vec<Vec<f64>>;

impl WasmCalculator {
    fn matrix_operand(&self, text: &str, which: &str) -> Result<DMatrix<f64>> {
        self.inner
            .evaluate_matrix(text)
            .with_context(|| format!("{which} matrix '{text}'"))
    }

    fn vector_operand(&self, text: &str, which: &str) -> Result<Vec<f64>> {
        self.inner
            .evaluate_vector(text)
            .with_context(|| format!("{which} vector '{text}'"))
    }

    pub(crate) fn binary_matrix_op(
        &self,
        a: &str,
        b: &str,
        op: fn(&DMatrix<f64>, &DMatrix<f64>) -> scicalc_core::CalcResult<DMatrix<f64>>,
    ) -> Result<Rows> {
        let left = self.matrix_operand(a, "left")?;
        let right = self.matrix_operand(b, "right")?;
        Ok(matrix::to_rows(&op(&left, &right)?))
    }

    pub(crate) fn determinant_of(&self, text: &str) -> Result<f64> {
        let m = self.matrix_operand(text, "input")?;
        Ok(matrix::determinant(&m)?)
    }

    pub(crate) fn inverse_of(&self, text: &str) -> Result<Rows> {
        let m = self.matrix_operand(text, "input")?;
        let inv = matrix::inverse(&m).context("inverse")?;
        Ok(matrix::to_rows(&inv))
    }

    pub(crate) fn transpose_of(&self, text: &str) -> Result<Rows> {
        let m = self.matrix_operand(text, "input")?;
        Ok(matrix::to_rows(&matrix::transpose(&m)))
    }

    pub(crate) fn scale_of(&self, text: &str, factor: f64) -> Result<Rows> {
        let m = self.matrix_operand(text, "input")?;
        Ok(matrix::to_rows(&matrix::scale(&m, factor)))
    }

    pub(crate) fn dot_of(&self, a: &str, b: &str) -> Result<f64> {
        let left = self.vector_operand(a, "left")?;
        let right = self.vector_operand(b, "right")?;
        Ok(vector::dot(&left, &right)?)
    }

    pub(crate) fn cross_of(&self, a: &str, b: &str) -> Result<[f64; 3]> {
        let left = self.vector_operand(a, "left")?;
        let right = self.vector_operand(b, "right")?;
        Ok(vector::cross(&left, &right)?)
    }

    pub(crate) fn angle_of(&self, a: &str, b: &str) -> Result<f64> {
        let left = self.vector_operand(a, "left")?;
        let right = self.vector_operand(b, "right")?;
        Ok(vector::angle_between(
            &left,
            &right,
            self.inner.settings().angle_mode,
        )?)
    }
}

fn rows_to_js(rows: Result<Rows>) -> Result<JsValue, JsValue> {
    let rows = rows.map_err(js_error)?;
    to_value(&rows).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
impl WasmCalculator {
    pub fn matrix_determinant(&self, text: &str) -> Result<f64, JsValue> {
        self.determinant_of(text).map_err(js_error)
    }

    pub fn matrix_inverse(&self, text: &str) -> Result<JsValue, JsValue> {
        rows_to_js(self.inverse_of(text))
    }

    pub fn matrix_transpose(&self, text: &str) -> Result<JsValue, JsValue> {
        rows_to_js(self.transpose_of(text))
    }

    pub fn matrix_scale(&self, text: &str, factor: f64) -> Result<JsValue, JsValue> {
        rows_to_js(self.scale_of(text, factor))
    }

    pub fn matrix_multiply(&self, a: &str, b: &str) -> Result<JsValue, JsValue> {
        rows_to_js(self.binary_matrix_op(a, b, matrix::multiply))
    }

    pub fn matrix_add(&self, a: &str, b: &str) -> Result<JsValue, JsValue> {
        rows_to_js(self.binary_matrix_op(a, b, matrix::add))
    }

    pub fn matrix_subtract(&self, a: &str, b: &str) -> Result<JsValue, JsValue> {
        rows_to_js(self.binary_matrix_op(a, b, matrix::subtract))
    }

    pub fn vector_dot(&self, a: &str, b: &str) -> Result<f64, JsValue> {
        self.dot_of(a, b).map_err(js_error)
    }

    pub fn vector_cross(&self, a: &str, b: &str) -> Result<Float64Array, JsValue> {
        let product = self.cross_of(a, b).map_err(js_error)?;
        Ok(Float64Array::from(&product[..]))
    }

    pub fn vector_magnitude(&self, text: &str) -> Result<f64, JsValue> {
        self.vector_operand(text, "input")
            .map(|v| vector::magnitude(&v))
            .map_err(js_error)
    }

    /// Angle between two vectors in the session's angle mode.
    pub fn vector_angle(&self, a: &str, b: &str) -> Result<f64, JsValue> {
        self.angle_of(a, b).map_err(js_error)
    }
}
