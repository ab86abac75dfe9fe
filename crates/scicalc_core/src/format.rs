//! Display formatting for results.
//!
//! Every string produced here for a finite value tokenizes back to the same
//! displayed number, so a formatted answer can be fed straight back in.

use crate::mathlib::algebra::round_half_up;
use crate::settings::{DisplayMode, MAX_DECIMAL_PLACES};

/// Above this magnitude plain notation switches to an exponent.
const PLAIN_LIMIT: f64 = 1e21;

/// From 2^53 up every double is an integer.
const INTEGRAL_LIMIT: f64 = 9_007_199_254_740_992.0;

pub fn format_result(value: f64, mode: DisplayMode, decimal_places: usize) -> String {
    let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    match mode {
        DisplayMode::Fixed => fixed(value, decimal_places),
        DisplayMode::Scientific => scientific(value, decimal_places),
        DisplayMode::Engineering => engineering(value, decimal_places),
    }
}

/// Rounds to `decimal_places` and prints the shortest representation.
fn fixed(value: f64, decimal_places: usize) -> String {
    if value.abs() >= INTEGRAL_LIMIT {
        return shortest(value);
    }
    let factor = 10f64.powi(decimal_places as i32);
    let scaled = value * factor;
    let rounded = if scaled.is_finite() && factor.is_finite() {
        round_half_up(scaled) / factor
    } else {
        value
    };
    shortest(rounded)
}

fn shortest(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.
        return "0".to_string();
    }
    if value.abs() >= PLAIN_LIMIT {
        return with_signed_exponent(&format!("{value:e}"));
    }
    format!("{value}")
}

fn scientific(value: f64, decimal_places: usize) -> String {
    with_signed_exponent(&format!("{value:.decimal_places$e}"))
}

/// Mantissa in `[1, 1000)` and an exponent divisible by three.
fn engineering(value: f64, decimal_places: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let mut exponent = ((value.abs().log10() / 3.0).floor() * 3.0) as i32;
    // log10 can land a hair off at exact powers of ten.
    if (value / 10f64.powi(exponent)).abs() >= 1000.0 {
        exponent += 3;
    } else if (value / 10f64.powi(exponent)).abs() < 1.0 {
        exponent -= 3;
    }
    let mantissa = value / 10f64.powi(exponent);
    let sign = if exponent < 0 { "-" } else { "+" };
    format!("{mantissa:.decimal_places$}e{sign}{}", exponent.abs())
}

/// `1.5e3` becomes `1.5e+3`.
fn with_signed_exponent(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_render_as_words() {
        assert_eq!(format_result(f64::NAN, DisplayMode::Fixed, 10), "NaN");
        assert_eq!(format_result(f64::INFINITY, DisplayMode::Scientific, 4), "Infinity");
        assert_eq!(
            format_result(f64::NEG_INFINITY, DisplayMode::Engineering, 4),
            "-Infinity"
        );
    }

    #[test]
    fn fixed_rounds_and_trims() {
        assert_eq!(format_result(2.0 / 3.0, DisplayMode::Fixed, 10), "0.6666666667");
        assert_eq!(format_result(0.1 + 0.2, DisplayMode::Fixed, 10), "0.3");
        assert_eq!(format_result(42.0, DisplayMode::Fixed, 10), "42");
        assert_eq!(format_result(-0.0, DisplayMode::Fixed, 10), "0");
        assert_eq!(format_result(1.25, DisplayMode::Fixed, 1), "1.3");
        assert_eq!(format_result(2.5e22, DisplayMode::Fixed, 10), "2.5e+22");
    }

    #[test]
    fn fixed_falls_back_when_scaling_overflows() {
        assert_eq!(format_result(1e300, DisplayMode::Fixed, 10), "1e+300");
        assert_eq!(format_result(0.5, DisplayMode::Fixed, 400), "0.5");
    }

    #[test]
    fn precision_beyond_the_display_limit_is_clamped() {
        let sci = format_result(1.0 / 3.0, DisplayMode::Scientific, 65_536);
        assert_eq!(sci, format_result(1.0 / 3.0, DisplayMode::Scientific, MAX_DECIMAL_PLACES));
        assert!(sci.ends_with("e-1"));
        let eng = format_result(1.0 / 3.0, DisplayMode::Engineering, 5_000_000);
        assert!(eng.starts_with("333.333"));
        assert!(eng.ends_with("e-3"));
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(format_result(1234.56, DisplayMode::Scientific, 3), "1.235e+3");
        assert_eq!(format_result(0.00012, DisplayMode::Scientific, 1), "1.2e-4");
    }

    #[test]
    fn engineering_notation_uses_multiples_of_three() {
        assert_eq!(format_result(12346.0, DisplayMode::Engineering, 2), "12.35e+3");
        assert_eq!(format_result(0.0042, DisplayMode::Engineering, 1), "4.2e-3");
        assert_eq!(format_result(-1500.0, DisplayMode::Engineering, 1), "-1.5e+3");
        assert_eq!(format_result(0.0, DisplayMode::Engineering, 2), "0");
    }
}
