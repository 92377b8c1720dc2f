//! Arithmetic policies for coefficient manipulation.
//!
//! Elimination either works in floating point with a zero tolerance, or
//! in validated integer arithmetic where every intermediate value must
//! stay integral.

use crate::error::{FmeError, Result};

/// How coefficients and bounds are scaled and added during elimination.
#[derive(Debug, Clone, Copy)]
pub enum Arithmetic {
    /// Floating-point arithmetic. Results with magnitude at most
    /// `zero_tolerance` are clamped to exactly zero.
    Tolerant {
        /// Magnitude below which a result counts as zero.
        zero_tolerance: f64,
    },
    /// Integer arithmetic. Every input and result must be within
    /// `integer_tolerance` of an integer, and is rounded to it.
    Exact {
        /// Maximum allowed distance from an integer.
        integer_tolerance: f64,
    },
}

impl Arithmetic {
    /// Multiply `value` by `scalar` under this policy.
    pub fn scale(
        &self,
        scalar: f64,
        value: f64,
        context: impl FnOnce() -> String,
    ) -> Result<f64> {
        match *self {
            Arithmetic::Tolerant { zero_tolerance } => {
                Ok(clamp_zero(scalar * value, zero_tolerance))
            }
            Arithmetic::Exact { integer_tolerance } => {
                let context = context();
                let s = as_integer(scalar, integer_tolerance, || format!("scale of {context}"))?;
                let v = as_integer(value, integer_tolerance, || context)?;
                Ok((s * v) as f64)
            }
        }
    }

    /// Add `a` and `b` under this policy.
    pub fn add(&self, a: f64, b: f64, context: impl FnOnce() -> String) -> Result<f64> {
        match *self {
            Arithmetic::Tolerant { zero_tolerance } => Ok(clamp_zero(a + b, zero_tolerance)),
            Arithmetic::Exact { integer_tolerance } => {
                let context = context();
                let a = as_integer(a, integer_tolerance, || context.clone())?;
                let b = as_integer(b, integer_tolerance, || context)?;
                Ok((a + b) as f64)
            }
        }
    }
}

fn clamp_zero(value: f64, tolerance: f64) -> f64 {
    if value.abs() <= tolerance {
        0.0
    } else {
        value
    }
}

/// Round `value` to the nearest integer, failing if it is further than
/// `tolerance` away.
pub fn as_integer(value: f64, tolerance: f64, context: impl FnOnce() -> String) -> Result<i64> {
    let rounded = value.round();
    if (rounded - value).abs() <= tolerance {
        Ok(rounded as i64)
    } else {
        Err(FmeError::NonIntegerData {
            context: context(),
            value,
        })
    }
}

/// Greatest common divisor.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of a nonempty slice.
pub fn lcm(values: &[i64]) -> i64 {
    values
        .iter()
        .fold(1, |acc, &v| if v == 0 { acc } else { acc / gcd(acc, v) * v.abs() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_clamps_to_zero() {
        let arith = Arithmetic::Tolerant { zero_tolerance: 1e-9 };
        let r = arith.add(1.0, -1.0 + 1e-10, || "t".to_string()).unwrap();
        assert_eq!(r, 0.0);
        let r = arith.scale(1e-5, 1e-5, || "t".to_string()).unwrap();
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_exact_rejects_fractions() {
        let arith = Arithmetic::Exact { integer_tolerance: 1e-9 };
        let err = arith.scale(0.5, 2.0, || "coefficient of x".to_string());
        assert!(matches!(err, Err(FmeError::NonIntegerData { .. })));
        assert_eq!(arith.scale(3.0, 2.0, || "t".to_string()).unwrap(), 6.0);
    }

    #[test]
    fn test_exact_tolerance_rounds() {
        let arith = Arithmetic::Exact { integer_tolerance: 1e-6 };
        let r = arith.add(2.0 + 1e-8, 3.0, || "t".to_string()).unwrap();
        assert_eq!(r, 5.0);
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-4, 6), 2);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(lcm(&[2, 3, 4]), 12);
        assert_eq!(lcm(&[5]), 5);
        assert_eq!(lcm(&[-2, 3]), 6);
    }
}
