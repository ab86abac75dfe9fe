use crate::error::CalcError;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Unit convention applied by the trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degree,
    Radian,
    Grad,
}

impl FromStr for AngleMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degree" | "deg" => Ok(AngleMode::Degree),
            "radian" | "rad" => Ok(AngleMode::Radian),
            "grad" | "gradian" => Ok(AngleMode::Grad),
            other => Err(CalcError::Parse(format!("unknown angle mode '{other}'"))),
        }
    }
}

/// Formatting of final results. Never affects computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Fixed,
    Scientific,
    Engineering,
}

impl FromStr for DisplayMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fix" => Ok(DisplayMode::Fixed),
            "scientific" | "sci" => Ok(DisplayMode::Scientific),
            "engineering" | "eng" => Ok(DisplayMode::Engineering),
            other => Err(CalcError::Parse(format!("unknown display mode '{other}'"))),
        }
    }
}

/// What the direct-calculation path does with unclosed parentheses.
///
/// Extra closing parentheses are rejected under either policy, and the
/// function-binding path always repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParenPolicy {
    #[default]
    Repair,
    Strict,
}

impl FromStr for ParenPolicy {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repair" => Ok(ParenPolicy::Repair),
            "strict" => Ok(ParenPolicy::Strict),
            other => Err(CalcError::Parse(format!("unknown parenthesis policy '{other}'"))),
        }
    }
}

/// How Taylor coefficients estimate the n-th derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaylorScheme {
    /// Every order n >= 1 reuses the first central difference, as the
    /// calculator always has. Only exact for functions like `exp` whose
    /// derivatives all coincide at the center.
    #[default]
    RepeatedFirstDifference,
    /// Applies the central-difference operator n times. Converges for smooth
    /// functions but loses precision quickly as n grows.
    IteratedCentralDifference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculusSettings {
    pub derivative_step: f64,
    pub integration_intervals: usize,
    pub scan_step: f64,
    pub taylor_terms: usize,
    pub taylor_scheme: TaylorScheme,
}

impl Default for CalculusSettings {
    fn default() -> Self {
        Self {
            derivative_step: 1e-4,
            integration_intervals: 1000,
            scan_step: 0.1,
            taylor_terms: 6,
            taylor_scheme: TaylorScheme::RepeatedFirstDifference,
        }
    }
}

/// Widest precision the display accepts.
pub const MAX_DECIMAL_PLACES: usize = 100;

fn clamped_decimal_places<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    usize::deserialize(deserializer).map(|places| places.min(MAX_DECIMAL_PLACES))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    pub angle_mode: AngleMode,
    pub display_mode: DisplayMode,
    /// At most [`MAX_DECIMAL_PLACES`].
    #[serde(deserialize_with = "clamped_decimal_places")]
    pub decimal_places: usize,
    pub paren_policy: ParenPolicy,
    pub calculus: CalculusSettings,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Degree,
            display_mode: DisplayMode::Fixed,
            decimal_places: 10,
            paren_policy: ParenPolicy::Repair,
            calculus: CalculusSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AngleMode, CalculatorSettings, DisplayMode, ParenPolicy, TaylorScheme, MAX_DECIMAL_PLACES,
    };

    #[test]
    fn defaults_match_calculator_startup_state() {
        let settings = CalculatorSettings::default();
        assert_eq!(settings.angle_mode, AngleMode::Degree);
        assert_eq!(settings.display_mode, DisplayMode::Fixed);
        assert_eq!(settings.decimal_places, 10);
        assert_eq!(settings.paren_policy, ParenPolicy::Repair);
        assert_eq!(settings.calculus.integration_intervals, 1000);
        assert!((settings.calculus.scan_step - 0.1).abs() < 1e-15);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: CalculatorSettings =
            serde_json::from_str(r#"{"angle_mode":"radian","calculus":{"scan_step":0.5}}"#)
                .expect("settings should deserialize");
        assert_eq!(settings.angle_mode, AngleMode::Radian);
        assert_eq!(settings.display_mode, DisplayMode::Fixed);
        assert!((settings.calculus.scan_step - 0.5).abs() < 1e-15);
        assert!((settings.calculus.derivative_step - 1e-4).abs() < 1e-15);
        assert_eq!(
            settings.calculus.taylor_scheme,
            TaylorScheme::RepeatedFirstDifference
        );
    }

    #[test]
    fn oversized_decimal_places_are_clamped_on_load() {
        let settings: CalculatorSettings = serde_json::from_str(r#"{"decimal_places":5000000}"#)
            .expect("settings should deserialize");
        assert_eq!(settings.decimal_places, MAX_DECIMAL_PLACES);
    }

    #[test]
    fn taylor_scheme_uses_snake_case_names() {
        let json = serde_json::to_string(&TaylorScheme::IteratedCentralDifference)
            .expect("serializes");
        assert_eq!(json, r#""iterated_central_difference""#);
    }

    #[test]
    fn modes_parse_short_and_long_names() {
        assert_eq!("rad".parse::<AngleMode>().unwrap(), AngleMode::Radian);
        assert_eq!("Degree".parse::<AngleMode>().unwrap(), AngleMode::Degree);
        assert_eq!("eng".parse::<DisplayMode>().unwrap(), DisplayMode::Engineering);
        assert!("turns".parse::<AngleMode>().is_err());
        assert_eq!("Strict".parse::<ParenPolicy>().unwrap(), ParenPolicy::Strict);
    }
}
