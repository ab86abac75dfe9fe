use crate::calculus::{self, CriticalPoint, Extrema, InflectionPoint, Limit, LimitDirection};
use crate::error::{CalcError, CalcResult};
use crate::evaluator::{evaluate, ExpressionFunction};
use crate::format::format_result;
use crate::mathlib::matrix::{from_rows, split_matrix_literal, split_vector_literal};
use crate::normalizer::{normalize, SymbolTable};
use crate::settings::{
    AngleMode, CalculatorSettings, DisplayMode, ParenPolicy, MAX_DECIMAL_PLACES,
};
use crate::traits::RealFunction;
use nalgebra::DMatrix;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub value: f64,
    /// The result as it was displayed when committed.
    pub display: String,
}

/// One calculator session.
///
/// Owns the settings, the stored variables, the last answer, the memory
/// register and the history. Only [`Calculator::commit`] and the explicit
/// store/memory operations change state; evaluation alone never does.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    settings: CalculatorSettings,
    symbols: SymbolTable,
    memory: f64,
    history: Vec<HistoryEntry>,
}

impl Calculator {
    pub fn new(mut settings: CalculatorSettings) -> Self {
        settings.decimal_places = settings.decimal_places.min(MAX_DECIMAL_PLACES);
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        debug!(?mode, "angle mode changed");
        self.settings.angle_mode = mode;
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        debug!(?mode, "display mode changed");
        self.settings.display_mode = mode;
    }

    /// Clamped to [`MAX_DECIMAL_PLACES`].
    pub fn set_decimal_places(&mut self, places: usize) {
        let places = places.min(MAX_DECIMAL_PLACES);
        debug!(places, "decimal places changed");
        self.settings.decimal_places = places;
    }

    pub fn set_paren_policy(&mut self, policy: ParenPolicy) {
        debug!(?policy, "parenthesis policy changed");
        self.settings.paren_policy = policy;
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Direct-calculation path: angle mode and parenthesis policy from the
    /// session settings.
    pub fn evaluate(&self, text: &str) -> CalcResult<f64> {
        let normalized = normalize(text, &self.symbols, None, self.settings.paren_policy)?;
        evaluate(&normalized, self.settings.angle_mode)
    }

    pub fn format(&self, value: f64) -> String {
        format_result(
            value,
            self.settings.display_mode,
            self.settings.decimal_places,
        )
    }

    /// Evaluates and formats without touching session state. Failures come
    /// back as display text.
    pub fn evaluate_expression(&self, text: &str) -> String {
        match self.evaluate(text) {
            Ok(value) => self.format(value),
            Err(err) => err.display_message(),
        }
    }

    /// Evaluates and, on success, records the value as `ANS` and appends to
    /// the history. A failed commit leaves the session unchanged.
    pub fn commit(&mut self, text: &str) -> CalcResult<f64> {
        match self.evaluate(text) {
            Ok(value) => {
                let shown = self.format(value);
                debug!(expression = text, %shown, "committed");
                self.symbols.last_answer = Some(value);
                self.history.push(HistoryEntry {
                    expression: text.to_string(),
                    value,
                    display: shown,
                });
                Ok(value)
            }
            Err(err) => {
                debug!(expression = text, %err, "commit failed");
                Err(err)
            }
        }
    }

    /// [`Calculator::commit`], rendered for display.
    pub fn calculate(&mut self, text: &str) -> String {
        match self.commit(text) {
            Ok(value) => self.format(value),
            Err(err) => err.display_message(),
        }
    }

    pub fn last_answer(&self) -> Option<f64> {
        self.symbols.last_answer
    }

    /// Stores the last answer (0 before any commit) under `name`.
    pub fn store_variable(&mut self, name: char) -> CalcResult<f64> {
        let value = self.symbols.last_answer.unwrap_or(0.0);
        self.set_variable(name, value)?;
        Ok(value)
    }

    pub fn set_variable(&mut self, name: char, value: f64) -> CalcResult<()> {
        if !name.is_ascii_uppercase() {
            return Err(CalcError::Domain(format!(
                "variable names are A-Z, got '{name}'"
            )));
        }
        debug!(%name, value, "stored variable");
        self.symbols.variables.insert(name, value);
        Ok(())
    }

    pub fn variable(&self, name: char) -> Option<f64> {
        self.symbols.variables.get(&name).copied()
    }

    pub fn clear_variables(&mut self) {
        self.symbols.variables.clear();
    }

    /// M+
    pub fn memory_add(&mut self) -> f64 {
        self.memory += self.symbols.last_answer.unwrap_or(0.0);
        debug!(memory = self.memory, "memory add");
        self.memory
    }

    /// M−
    pub fn memory_subtract(&mut self) -> f64 {
        self.memory -= self.symbols.last_answer.unwrap_or(0.0);
        debug!(memory = self.memory, "memory subtract");
        self.memory
    }

    /// MC
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// MR
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Re-commits the expression of history entry `index`.
    pub fn recall_history(&mut self, index: usize) -> CalcResult<f64> {
        let expression = self
            .history
            .get(index)
            .map(|entry| entry.expression.clone())
            .ok_or_else(|| CalcError::Domain(format!("no history entry {index}")))?;
        self.commit(&expression)
    }

    /// `expr` as a function of `variable`, seeing this session's variables.
    pub fn function<'a>(&'a self, expr: &'a str, variable: &'a str) -> ExpressionFunction<'a> {
        ExpressionFunction::new(expr, variable).with_symbols(&self.symbols)
    }

    pub fn evaluate_function_at(&self, expr: &str, variable: &str, value: f64) -> f64 {
        self.function(expr, variable).eval(value)
    }

    pub fn differentiate(&self, expr: &str, variable: &str, point: f64) -> f64 {
        let h = self.settings.calculus.derivative_step;
        calculus::differentiate(&self.function(expr, variable), point, h)
    }

    pub fn integrate(&self, expr: &str, variable: &str, a: f64, b: f64) -> f64 {
        let n = self.settings.calculus.integration_intervals;
        calculus::integrate(&self.function(expr, variable), a, b, n)
    }

    pub fn integrate_trapezoid(&self, expr: &str, variable: &str, a: f64, b: f64) -> f64 {
        let n = self.settings.calculus.integration_intervals;
        calculus::integrate_trapezoid(&self.function(expr, variable), a, b, n)
    }

    pub fn limit(
        &self,
        expr: &str,
        variable: &str,
        point: f64,
        direction: LimitDirection,
    ) -> Limit {
        calculus::limit(&self.function(expr, variable), point, direction)
    }

    pub fn taylor_coefficients(&self, expr: &str, variable: &str, center: f64) -> Vec<f64> {
        let settings = &self.settings.calculus;
        calculus::taylor_coefficients(
            &self.function(expr, variable),
            center,
            settings.taylor_terms,
            settings.taylor_scheme,
        )
    }

    pub fn taylor_series(&self, expr: &str, variable: &str, center: f64, at: f64) -> f64 {
        let settings = &self.settings.calculus;
        calculus::taylor_series(
            &self.function(expr, variable),
            center,
            settings.taylor_terms,
            at,
            settings.taylor_scheme,
        )
    }

    pub fn find_critical_points(
        &self,
        expr: &str,
        variable: &str,
        start: f64,
        end: f64,
    ) -> Vec<CriticalPoint> {
        let step = self.settings.calculus.scan_step;
        calculus::find_critical_points(&self.function(expr, variable), start, end, step)
    }

    pub fn find_extrema(&self, expr: &str, variable: &str, start: f64, end: f64) -> Option<Extrema> {
        let step = self.settings.calculus.scan_step;
        calculus::find_extrema(&self.function(expr, variable), start, end, step)
    }

    pub fn find_inflection_points(
        &self,
        expr: &str,
        variable: &str,
        start: f64,
        end: f64,
    ) -> Vec<InflectionPoint> {
        let step = self.settings.calculus.scan_step;
        calculus::find_inflection_points(&self.function(expr, variable), start, end, step)
    }

    /// Parses `[[a, b], [c, d]]`, evaluating each element in this session.
    pub fn evaluate_matrix(&self, text: &str) -> CalcResult<DMatrix<f64>> {
        let rows = split_matrix_literal(text)?
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| self.evaluate(cell))
                    .collect::<CalcResult<Vec<f64>>>()
            })
            .collect::<CalcResult<Vec<Vec<f64>>>>()?;
        from_rows(&rows)
    }

    /// Parses `[a, b, c]`, evaluating each element in this session.
    pub fn evaluate_vector(&self, text: &str) -> CalcResult<Vec<f64>> {
        split_vector_literal(text)?
            .iter()
            .map(|cell| self.evaluate(cell))
            .collect()
    }
}
