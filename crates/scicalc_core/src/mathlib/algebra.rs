use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticRoots {
    pub x1: f64,
    pub x2: f64,
    pub discriminant: f64,
}

/// Real roots of `a·x² + b·x + c = 0`.
///
/// A negative discriminant yields NaN roots alongside the discriminant itself.
/// `a = 0` is not special-cased; the division follows IEEE rules.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> QuadraticRoots {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return QuadraticRoots {
            x1: f64::NAN,
            x2: f64::NAN,
            discriminant,
        };
    }
    let root = discriminant.sqrt();
    QuadraticRoots {
        x1: (-b + root) / (2.0 * a),
        x2: (-b - root) / (2.0 * a),
        discriminant,
    }
}

pub fn nth_root(x: f64, n: f64) -> f64 {
    // Odd integer roots of negatives are real.
    if x < 0.0 && n.fract() == 0.0 && (n as i64) % 2 != 0 {
        return -(-x).powf(1.0 / n);
    }
    x.powf(1.0 / n)
}

/// Rounds halves toward positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_real_roots() {
        let roots = solve_quadratic(1.0, -3.0, 2.0);
        let mut found = [roots.x1, roots.x2];
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(found, [1.0, 2.0]);
        assert_eq!(roots.discriminant, 1.0);
    }

    #[test]
    fn negative_discriminant_reports_nan_roots() {
        let roots = solve_quadratic(1.0, 0.0, 1.0);
        assert!(roots.x1.is_nan());
        assert!(roots.x2.is_nan());
        assert_eq!(roots.discriminant, -4.0);
    }

    #[test]
    fn nth_root_handles_odd_negative() {
        assert!((nth_root(27.0, 3.0) - 3.0).abs() < 1e-12);
        assert!((nth_root(-8.0, 3.0) + 2.0).abs() < 1e-12);
        assert!(nth_root(-16.0, 4.0).is_nan());
    }

    #[test]
    fn rounding_halves_go_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }
}
