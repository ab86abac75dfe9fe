//! WASM bindings for the scientific calculator.
//!
//! `WasmCalculator` wraps one `scicalc_core::Calculator` session; its methods
//! are split by concern across the modules below. Stateless library pieces are
//! exported as free functions from `tools`.

mod calculator;
mod calculus;
mod matrix;
mod tools;

pub use calculator::WasmCalculator;
pub use tools::*;

use wasm_bindgen::JsValue;

/// Renders an error chain for JS, outermost context first.
pub(crate) fn js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}
