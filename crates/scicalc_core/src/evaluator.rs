use crate::equation_engine::{parse_tokens, Compiler, VM};
use crate::error::CalcResult;
use crate::normalizer::{normalize, Binding, NormalizedExpr, SymbolTable};
use crate::settings::{AngleMode, ParenPolicy};
use crate::traits::RealFunction;
use tracing::trace;

static EMPTY_SYMBOLS: SymbolTable = SymbolTable::new();

/// Reduces a normalized expression to a number.
///
/// Arithmetic never fails here: division by zero, `sqrt(-1)` and friends
/// come back as infinities or NaN. Only structural problems are errors.
pub fn evaluate(expr: &NormalizedExpr, mode: AngleMode) -> CalcResult<f64> {
    let ast = parse_tokens(expr.tokens())?;
    let bytecode = Compiler::compile(&ast)?;
    let mut stack = Vec::with_capacity(16);
    Ok(VM::execute(&bytecode, mode, &mut stack))
}

/// Normalizes and evaluates in one step.
pub fn evaluate_text(
    text: &str,
    symbols: &SymbolTable,
    mode: AngleMode,
    policy: ParenPolicy,
) -> CalcResult<f64> {
    let normalized = normalize(text, symbols, None, policy)?;
    evaluate(&normalized, mode)
}

/// Evaluates `expr` with `variable` bound to `value`, using no session values.
pub fn evaluate_function_at(expr: &str, variable: &str, value: f64) -> f64 {
    ExpressionFunction::new(expr, variable).eval(value)
}

/// An expression in one free variable, viewed as a real function.
///
/// Trigonometric calls always read radians here regardless of the session
/// angle mode, and missing closing parentheses are always repaired. Any
/// failure yields NaN so numerical routines can skip the sample.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionFunction<'a> {
    expr: &'a str,
    variable: &'a str,
    symbols: &'a SymbolTable,
}

impl<'a> ExpressionFunction<'a> {
    pub fn new(expr: &'a str, variable: &'a str) -> Self {
        Self {
            expr,
            variable,
            symbols: &EMPTY_SYMBOLS,
        }
    }

    /// Makes stored variables and `ANS` visible to the expression.
    pub fn with_symbols(mut self, symbols: &'a SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn try_eval(&self, value: f64) -> CalcResult<f64> {
        let binding = Binding {
            variable: self.variable,
            value,
        };
        let normalized = normalize(self.expr, self.symbols, Some(binding), ParenPolicy::Repair)?;
        evaluate(&normalized, AngleMode::Radian)
    }
}

impl RealFunction for ExpressionFunction<'_> {
    fn eval(&self, x: f64) -> f64 {
        match self.try_eval(x) {
            Ok(y) => y,
            Err(err) => {
                trace!(expr = self.expr, x, %err, "sample failed");
                f64::NAN
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalcError, ParenIssue};

    fn eval(text: &str) -> f64 {
        evaluate_text(text, &SymbolTable::new(), AngleMode::Degree, ParenPolicy::Repair)
            .expect("evaluates")
    }

    #[test]
    fn direct_path_uses_angle_mode() {
        assert!((eval("sin(30)") - 0.5).abs() < 1e-12);
        let rad = evaluate_text(
            "sin(pi/6)",
            &SymbolTable::new(),
            AngleMode::Radian,
            ParenPolicy::Repair,
        )
        .expect("evaluates");
        assert!((rad - 0.5).abs() < 1e-12);
    }

    #[test]
    fn arithmetic_failures_are_values() {
        assert_eq!(eval("1/0"), f64::INFINITY);
        assert!(eval("sqrt(-1)").is_nan());
        assert!(eval("ln(-1)").is_nan());
    }

    #[test]
    fn repaired_and_strict_paths() {
        assert_eq!(eval("2*(3+4"), 14.0);
        let err = evaluate_text(
            "2*(3+4",
            &SymbolTable::new(),
            AngleMode::Degree,
            ParenPolicy::Strict,
        )
        .expect_err("strict");
        assert_eq!(err, CalcError::UnmatchedParen(ParenIssue::MissingClosing));
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = evaluate_text("2*q", &SymbolTable::new(), AngleMode::Degree, ParenPolicy::Repair)
            .expect_err("unknown");
        assert!(matches!(err, CalcError::UnknownIdentifier(_)));
    }

    #[test]
    fn function_binding_reads_radians() {
        let y = evaluate_function_at("sin(x)", "x", std::f64::consts::FRAC_PI_2);
        assert!((y - 1.0).abs() < 1e-12);
        assert_eq!(evaluate_function_at("x^2+1", "x", 3.0), 10.0);
        assert_eq!(evaluate_function_at("-x^2", "x", 3.0), -9.0);
        assert_eq!(evaluate_function_at("x^2", "x", -3.0), 9.0);
    }

    #[test]
    fn function_binding_failures_become_nan() {
        assert!(evaluate_function_at("x+", "x", 1.0).is_nan());
        assert!(evaluate_function_at("y*2", "x", 1.0).is_nan());
        assert!(evaluate_function_at("(x", "x", 1.0) == 1.0);
        assert!(evaluate_function_at("x)", "x", 1.0).is_nan());
    }

    #[test]
    fn bound_variable_does_not_clobber_function_names() {
        let y = evaluate_function_at("exp(x)", "x", 1.0);
        assert!((y - std::f64::consts::E).abs() < 1e-12);
        let t = evaluate_function_at("t*e", "t", 2.0);
        assert!((t - 2.0 * std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn expression_function_sees_session_symbols() {
        let mut symbols = SymbolTable::new();
        symbols.variables.insert('A', 3.0);
        symbols.last_answer = Some(10.0);
        let f = ExpressionFunction::new("A*x+ANS", "x").with_symbols(&symbols);
        assert_eq!(f.eval(2.0), 16.0);
    }
}
