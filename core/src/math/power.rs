//! Conversions between logarithmic signal readings and linear power.
//!
//! The survey hardware reports signal strength as a loss-like magnitude, so
//! the dBm exponent is negated on the way to milliwatts and on the way
//! back. This diverges from the textbook dBm-to-mW conversion
//! (`10^(dbm/10)`) and is kept deliberately: downstream consumers depend on
//! the existing output scale.

/// Convert a dBm reading to linear milliwatts: `10^(-dbm/10)`.
pub fn to_linear_mw(dbm: f64) -> f64 {
    10f64.powf(-dbm / 10.0)
}

/// Convert linear milliwatts back to dBm: `-10 * log10(mw)`.
///
/// Exact inverse of [`to_linear_mw`].
pub fn to_dbm(mw: f64) -> f64 {
    -10.0 * mw.log10()
}

/// Re-express a linear-milliwatt spread on the established log scale:
/// `log10(mw)`.
///
/// Note this is a bare decadic log, not a dB conversion (`10 * log10`).
/// It matches the output scale the plotting layer was built against.
pub fn stdev_to_log(mw: f64) -> f64 {
    mw.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dbm_to_mw_follows_negated_exponent() {
        assert!((to_linear_mw(-80.0) - 1e8).abs() < 1e-3);
        assert!((to_linear_mw(-90.0) - 1e9).abs() < 1e-2);
        assert!((to_linear_mw(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dbm_round_trips_through_milliwatts() {
        for dbm in [-113.0, -95.0, -80.5, -51.0, 0.0, 10.0] {
            let back = to_dbm(to_linear_mw(dbm));
            assert!((back - dbm).abs() < 1e-9, "round trip failed for {}", dbm);
        }
    }

    #[test]
    fn stdev_log_scale_is_bare_log10() {
        assert!((stdev_to_log(1000.0) - 3.0).abs() < 1e-12);
        assert!((stdev_to_log(1.0) - 0.0).abs() < 1e-12);
    }
}
