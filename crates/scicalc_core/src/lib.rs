/// The `scicalc_core` crate is the engine behind the scientific calculator.
/// It has no I/O; the browser bridge lives in `scicalc_wasm`.
///
/// Key components:
/// - **Normalizer**: rewrites user notation (constants, `ANS`, stored variables, a bound
///   free variable) over the token stream and repairs missing closing parentheses.
/// - **Equation Engine**: tokenizer, recursive-descent parser and a bytecode VM that
///   reduces an expression to a number.
/// - **Calculus**: finite-difference derivatives, Simpson/trapezoid integration, limits,
///   Taylor expansion and sampling scans, all over the `RealFunction` trait.
/// - **Session**: the `Calculator` context holding modes, variables, memory and history.
/// - **Mathlib**: trigonometry, statistics, number theory, matrices, vectors and conversions.
pub mod traits;
pub mod error;
pub mod settings;
pub mod equation_engine;
pub mod normalizer;
pub mod evaluator;
pub mod format;
pub mod calculus;
pub mod session;
pub mod mathlib;

pub use error::{CalcError, CalcResult};
pub use session::Calculator;
pub use settings::{AngleMode, CalculatorSettings, DisplayMode, ParenPolicy};
