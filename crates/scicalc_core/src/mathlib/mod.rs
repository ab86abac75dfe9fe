//! Pure, stateless math consumed by the evaluator and directly by callers.

pub mod algebra;
pub mod constants;
pub mod convert;
pub mod logic;
pub mod matrix;
pub mod number_theory;
pub mod stats;
pub mod trig;
pub mod vector;
