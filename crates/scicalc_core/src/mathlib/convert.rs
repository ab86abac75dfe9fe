//! Base and unit conversion.

use crate::error::{CalcError, CalcResult};

const SUPPORTED_RADICES: [u32; 4] = [2, 8, 10, 16];

fn check_radix(radix: u32) -> CalcResult<()> {
    if SUPPORTED_RADICES.contains(&radix) {
        Ok(())
    } else {
        Err(CalcError::Domain(format!("unsupported radix {radix}")))
    }
}

/// Renders an integral value in base 2, 8, 10 or 16 (uppercase digits).
pub fn to_base(value: f64, radix: u32) -> CalcResult<String> {
    check_radix(radix)?;
    if !value.is_finite() || value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
        return Err(CalcError::Domain(format!(
            "{value} is not an integer that fits base conversion"
        )));
    }
    let n = value as i64;
    let magnitude = n.unsigned_abs();
    let digits = match radix {
        2 => format!("{magnitude:b}"),
        8 => format!("{magnitude:o}"),
        16 => format!("{magnitude:X}"),
        _ => magnitude.to_string(),
    };
    Ok(if n < 0 { format!("-{digits}") } else { digits })
}

/// Parses digits in the given radix. Accepts an optional sign and the
/// `0b`/`0o`/`0x` prefix matching the radix.
pub fn from_base(text: &str, radix: u32) -> CalcResult<f64> {
    check_radix(radix)?;
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let prefix = match radix {
        2 => Some("0b"),
        8 => Some("0o"),
        16 => Some("0x"),
        _ => None,
    };
    let digits = prefix
        .and_then(|p| {
            body.strip_prefix(p)
                .or_else(|| body.strip_prefix(&p.to_ascii_uppercase()))
        })
        .unwrap_or(body);
    let parsed = u64::from_str_radix(digits, radix)
        .map_err(|_| CalcError::Domain(format!("'{text}' is not a base-{radix} number")))?;
    let value = parsed as f64;
    Ok(if negative { -value } else { value })
}

fn factor(table: &[(&str, f64)], unit: &str) -> CalcResult<f64> {
    table
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, f)| *f)
        .ok_or_else(|| CalcError::UnknownUnit(unit.to_string()))
}

fn convert_linear(table: &[(&str, f64)], value: f64, from: &str, to: &str) -> CalcResult<f64> {
    Ok(value * factor(table, from)? / factor(table, to)?)
}

/// Meters per unit.
const LENGTH: [(&str, f64); 8] = [
    ("m", 1.0),
    ("km", 1000.0),
    ("cm", 0.01),
    ("mm", 0.001),
    ("mi", 1609.34),
    ("yd", 0.9144),
    ("ft", 0.3048),
    ("in", 0.0254),
];

/// Kilograms per unit.
const MASS: [(&str, f64); 6] = [
    ("kg", 1.0),
    ("g", 0.001),
    ("mg", 1e-6),
    ("lb", 0.453_592_37),
    ("oz", 0.028_349_523_125),
    ("t", 1000.0),
];

/// Seconds per unit.
const TIME: [(&str, f64); 6] = [
    ("s", 1.0),
    ("ms", 0.001),
    ("min", 60.0),
    ("h", 3600.0),
    ("d", 86_400.0),
    ("wk", 604_800.0),
];

pub fn convert_length(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    convert_linear(&LENGTH, value, from, to)
}

pub fn convert_mass(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    convert_linear(&MASS, value, from, to)
}

pub fn convert_time(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    convert_linear(&TIME, value, from, to)
}

/// Temperature scales: `C`, `F`, `K`.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let celsius = match from {
        "C" => value,
        "F" => (value - 32.0) * 5.0 / 9.0,
        "K" => value - 273.15,
        other => return Err(CalcError::UnknownUnit(other.to_string())),
    };
    match to {
        "C" => Ok(celsius),
        "F" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "K" => Ok(celsius + 273.15),
        other => Err(CalcError::UnknownUnit(other.to_string())),
    }
}
