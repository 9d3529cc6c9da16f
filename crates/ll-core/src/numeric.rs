use crate::CoreError;

/// Floating point type used throughout the simulator.
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within the absolute tolerance, or within
/// the relative tolerance scaled by the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through, or report which quantity went non-finite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_uses_both_tolerances() {
        let tol = Tolerances::default();
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(1e9, 1e9 + 0.5, tol));
        assert!(!nearly_equal(1.0, 1.0001, tol));
    }

    #[test]
    fn ensure_finite_passes_values_through() {
        assert_eq!(ensure_finite(-2.5, "x").unwrap(), -2.5);
    }

    #[test]
    fn ensure_finite_names_the_quantity() {
        let err = ensure_finite(Real::INFINITY, "plant gain").unwrap_err();
        assert!(format!("{err}").contains("plant gain"));
    }
}
