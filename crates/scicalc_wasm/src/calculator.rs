//! Session wrapper: construction, modes, evaluation, variables, memory and history.

use crate::js_error;
use anyhow::{anyhow, Context};
use scicalc_core::settings::{AngleMode, CalculatorSettings, DisplayMode, ParenPolicy};
use scicalc_core::Calculator;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCalculator {
    pub(crate) inner: Calculator,
}

/// Variable names arrive from JS as strings; exactly one character is accepted.
pub(crate) fn variable_name(name: &str) -> anyhow::Result<char> {
    let mut chars = name.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(anyhow!("variable name must be a single letter, got '{name}'")),
    }
}

impl WasmCalculator {
    pub(crate) fn from_settings(settings: CalculatorSettings) -> Self {
        WasmCalculator {
            inner: Calculator::new(settings),
        }
    }
}

#[wasm_bindgen]
impl WasmCalculator {
    /// `settings` may be `undefined`, `null` or a partial settings object.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmCalculator, JsValue> {
        console_error_panic_hook::set_once();

        let settings = if settings.is_undefined() || settings.is_null() {
            CalculatorSettings::default()
        } else {
            from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("Invalid calculator settings: {e}")))?
        };
        Ok(Self::from_settings(settings))
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_value(self.inner.settings())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn set_angle_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: AngleMode = mode
            .parse()
            .context("set_angle_mode")
            .map_err(js_error)?;
        self.inner.set_angle_mode(mode);
        Ok(())
    }

    pub fn set_display_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: DisplayMode = mode
            .parse()
            .context("set_display_mode")
            .map_err(js_error)?;
        self.inner.set_display_mode(mode);
        Ok(())
    }

    pub fn set_decimal_places(&mut self, places: u32) {
        self.inner.set_decimal_places(places as usize);
    }

    pub fn set_paren_policy(&mut self, policy: &str) -> Result<(), JsValue> {
        let policy: ParenPolicy = policy
            .parse()
            .context("set_paren_policy")
            .map_err(js_error)?;
        self.inner.set_paren_policy(policy);
        Ok(())
    }

    /// Formatted result or error text. Does not change the session.
    pub fn evaluate_expression(&self, text: &str) -> String {
        self.inner.evaluate_expression(text)
    }

    /// Commits `text`: updates the last answer and history on success.
    pub fn calculate(&mut self, text: &str) -> String {
        self.inner.calculate(text)
    }

    pub fn evaluate_function_at(&self, expr: &str, variable: &str, value: f64) -> f64 {
        self.inner.evaluate_function_at(expr, variable, value)
    }

    pub fn last_answer(&self) -> Option<f64> {
        self.inner.last_answer()
    }

    /// Stores the last answer under `name` and returns the stored value.
    pub fn store_variable(&mut self, name: &str) -> Result<f64, JsValue> {
        variable_name(name)
            .and_then(|c| Ok(self.inner.store_variable(c)?))
            .context("store_variable")
            .map_err(js_error)
    }

    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        variable_name(name)
            .and_then(|c| Ok(self.inner.set_variable(c, value)?))
            .context("set_variable")
            .map_err(js_error)
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        variable_name(name).ok().and_then(|c| self.inner.variable(c))
    }

    pub fn clear_variables(&mut self) {
        self.inner.clear_variables();
    }

    pub fn memory_add(&mut self) -> f64 {
        self.inner.memory_add()
    }

    pub fn memory_subtract(&mut self) -> f64 {
        self.inner.memory_subtract()
    }

    pub fn memory_clear(&mut self) {
        self.inner.memory_clear();
    }

    pub fn memory_recall(&self) -> f64 {
        self.inner.memory_recall()
    }

    /// `[{ expression, value, display }, ...]`
    pub fn history(&self) -> Result<JsValue, JsValue> {
        to_value(self.inner.history())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn clear_history(&mut self) {
        self.inner.clear_history();
    }

    /// Re-commits history entry `index` and returns the display text.
    pub fn recall_history(&mut self, index: u32) -> String {
        match self.inner.recall_history(index as usize) {
            Ok(value) => self.inner.format(value),
            Err(err) => err.display_message(),
        }
    }
}
