//! Boolean and bitwise logic.
//!
//! The bitwise forms operate on the integer part of their operands and reject
//! anything that does not fit an `i64`.

use crate::error::{CalcError, CalcResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl LogicOp {
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            LogicOp::And => a && b,
            LogicOp::Or => a || b,
            LogicOp::Xor => a != b,
            LogicOp::Nand => !(a && b),
            LogicOp::Nor => !(a || b),
            LogicOp::Xnor => a == b,
        }
    }

    pub fn apply_bitwise(self, a: f64, b: f64) -> CalcResult<f64> {
        let (a, b) = (to_int(a)?, to_int(b)?);
        let result = match self {
            LogicOp::And => a & b,
            LogicOp::Or => a | b,
            LogicOp::Xor => a ^ b,
            LogicOp::Nand => !(a & b),
            LogicOp::Nor => !(a | b),
            LogicOp::Xnor => !(a ^ b),
        };
        Ok(result as f64)
    }
}

impl FromStr for LogicOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(LogicOp::And),
            "or" => Ok(LogicOp::Or),
            "xor" => Ok(LogicOp::Xor),
            "nand" => Ok(LogicOp::Nand),
            "nor" => Ok(LogicOp::Nor),
            "xnor" => Ok(LogicOp::Xnor),
            other => Err(CalcError::Parse(format!("unknown logic operator '{other}'"))),
        }
    }
}

pub fn not(a: bool) -> bool {
    !a
}

pub fn bitwise_not(a: f64) -> CalcResult<f64> {
    Ok(!to_int(a)? as f64)
}

fn to_int(value: f64) -> CalcResult<i64> {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return Err(CalcError::Domain(format!(
            "{value} is out of range for bitwise logic"
        )));
    }
    Ok(value.trunc() as i64)
}
