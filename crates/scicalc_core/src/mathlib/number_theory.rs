/// n! for the floor of `n`. NaN for negative input.
pub fn factorial(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    let n = n.floor();
    if n == 0.0 || n == 1.0 {
        return 1.0;
    }
    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        if result.is_infinite() {
            break;
        }
        i += 1.0;
    }
    result
}

/// nPr. Zero when r exceeds n.
pub fn permutation(n: f64, r: f64) -> f64 {
    if n < r {
        return 0.0;
    }
    factorial(n) / factorial(n - r)
}

/// nCr. Zero when r exceeds n.
pub fn combination(n: f64, r: f64) -> f64 {
    if n < r {
        return 0.0;
    }
    factorial(n) / (factorial(r) * factorial(n - r))
}

/// Euclid's algorithm on the magnitudes.
pub fn gcd(a: f64, b: f64) -> f64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    while b != 0.0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

pub fn lcm(a: f64, b: f64) -> f64 {
    let g = gcd(a, b);
    if g == 0.0 {
        return 0.0;
    }
    (a * b).abs() / g
}

/// Trial division with a 6k±1 wheel.
pub fn is_prime(n: f64) -> bool {
    if !n.is_finite() || n.fract() != 0.0 || n <= 1.0 {
        return false;
    }
    if n <= 3.0 {
        return true;
    }
    if n % 2.0 == 0.0 || n % 3.0 == 0.0 {
        return false;
    }
    let mut i = 5.0;
    while i * i <= n {
        if n % i == 0.0 || n % (i + 2.0) == 0.0 {
            return false;
        }
        i += 6.0;
    }
    true
}

/// Remainder with the sign of the dividend.
pub fn modulo(a: f64, b: f64) -> f64 {
    a % b
}
