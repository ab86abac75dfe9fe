//! Named mathematical and physical constants.

/// Golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Physical constants are available here by name only. They are not
/// expression symbols: single letters such as `G` belong to the stored
/// variable table.
pub fn lookup(name: &str) -> Option<f64> {
    let value = match name {
        "π" | "pi" => std::f64::consts::PI,
        "e" => std::f64::consts::E,
        "φ" | "phi" => PHI,
        // speed of light, m/s
        "c" => 299_792_458.0,
        // gravitational constant
        "G" => 6.674_30e-11,
        // Planck
        "h" => 6.626_070_15e-34,
        "ℏ" | "hbar" => 1.054_571_817e-34,
        // Boltzmann
        "k" => 1.380_649e-23,
        "N_A" => 6.022_140_76e23,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::lookup;

    #[test]
    fn finds_known_constants() {
        assert_eq!(lookup("pi"), Some(std::f64::consts::PI));
        assert_eq!(lookup("c"), Some(299_792_458.0));
        assert!(lookup("N_A").unwrap() > 6.0e23);
        assert_eq!(lookup("zz"), None);
    }
}
