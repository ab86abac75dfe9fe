use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars by the statistics helpers.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A real function of one real variable.
///
/// The numeric-methods engine only ever samples through this trait, so every
/// routine shares one evaluation path. Failed samples are reported as NaN.
pub trait RealFunction {
    /// Evaluates the function at `x`.
    fn eval(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> RealFunction for F {
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}
