use std::fmt;

use num_traits::ToPrimitive;
use thiserror::Error;

use crate::core::relation::{Relation, RelationError, Side};

/// Invalid relation configuration. These are caller bugs and are reported
/// immediately rather than turned into non-matching cells.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tolerance ({0}) cannot be negative")]
    NegativeTolerance(f64),

    #[error("tolerance ({0}) is not a number")]
    NanTolerance(f64),

    #[error("Unknown relation: {0}")]
    UnknownRelation(String),

    #[error("Invalid tolerance value: '{0}'")]
    InvalidToleranceValue(String),
}

/// Numbers correspond when both are finite and differ by at most the tolerance.
///
/// Operands may be any primitive numeric type; they are promoted to `f64`
/// before comparison, so integers and floats can be mixed.
///
/// ```
/// use correspond::{tolerance, Relation};
///
/// let close = tolerance(0.05).unwrap();
/// assert!(close.compare(Some(&2.04), Some(&2.0)).unwrap());
/// assert!(close.compare(Some(&2.0), Some(&2)).unwrap());
/// assert!(!close.compare(Some(&f64::INFINITY), Some(&f64::INFINITY)).unwrap());
/// assert_eq!(Relation::<f64, f64>::description(&close), "is a finite number within 0.05 of");
/// ```
#[derive(Debug, Clone)]
pub struct Tolerance {
    tolerance: f64,
    description: String,
}

/// Create a [`Tolerance`] relation.
///
/// # Errors
///
/// Returns [`ConfigError::NegativeTolerance`] if `tolerance` is negative, or
/// [`ConfigError::NanTolerance`] if it is NaN.
pub fn tolerance(tolerance: f64) -> Result<Tolerance, ConfigError> {
    Tolerance::new(tolerance)
}

impl Tolerance {
    /// See [`tolerance`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for negative or NaN tolerances.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        if tolerance.is_nan() {
            return Err(ConfigError::NanTolerance(tolerance));
        }
        if tolerance < 0.0 {
            return Err(ConfigError::NegativeTolerance(tolerance));
        }
        // -0.0 passes the check above but would describe itself as "-0"
        let tolerance = if tolerance == 0.0 { 0.0 } else { tolerance };
        Ok(Self {
            tolerance,
            description: format!("is a finite number within {tolerance} of"),
        })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.tolerance
    }
}

/// True when both values are finite and `|actual - expected| <= tolerance`.
///
/// Infinities are never within tolerance of anything, themselves included.
#[must_use]
pub fn equal_within_tolerance(actual: f64, expected: f64, tolerance: f64) -> bool {
    actual.is_finite() && expected.is_finite() && (actual - expected).abs() <= tolerance
}

fn promote<T: ToPrimitive>(value: Option<&T>, side: Side) -> Result<f64, RelationError> {
    let value = value.ok_or(RelationError::absent(side))?;
    value
        .to_f64()
        .ok_or_else(|| RelationError::message(format!("{side} operand is not a number")))
}

impl<A: ToPrimitive, E: ToPrimitive> Relation<A, E> for Tolerance {
    fn compare(&self, actual: Option<&A>, expected: Option<&E>) -> Result<bool, RelationError> {
        let actual = promote(actual, Side::Actual)?;
        let expected = promote(expected, Side::Expected)?;
        Ok(equal_within_tolerance(actual, expected, self.tolerance))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close<A: ToPrimitive, E: ToPrimitive>(tol: f64, actual: A, expected: E) -> bool {
        tolerance(tol)
            .unwrap()
            .compare(Some(&actual), Some(&expected))
            .unwrap()
    }

    #[test]
    fn test_compare_doubles() {
        assert!(close(0.0, 2.0, 2.0));
        assert!(close(0.00001, 2.0, 2.0));
        assert!(close(1000.0, 2.0, 2.0));
        assert!(close(1.00001, 2.0, 3.0));
        assert!(!close(1000.0, 2.0, 1003.0));
        assert!(!close(1000.0, 2.0, f64::INFINITY));
        assert!(!close(1000.0, f64::INFINITY, f64::INFINITY));
        assert!(!close(1000.0, 2.0, f64::NAN));
        assert!(!close(1000.0, f64::NAN, f64::NAN));
        assert!(close(0.0, -0.0, 0.0));
    }

    #[test]
    fn test_compare_floats() {
        assert!(close(0.0, 2.0f32, 2.0f32));
        assert!(close(0.00001, 2.0f32, 2.0f32));
        assert!(close(1000.0, 2.0f32, 2.0f32));
        assert!(close(1.00001, 2.0f32, 3.0f32));
        assert!(!close(1000.0, 2.0f32, 1003.0f32));
        assert!(!close(1000.0, 2.0f32, f32::INFINITY));
        assert!(!close(1000.0, f32::INFINITY, f32::INFINITY));
        assert!(!close(1000.0, 2.0f32, f32::NAN));
        assert!(!close(1000.0, f32::NAN, f32::NAN));
        assert!(close(0.0, -0.0f32, 0.0f32));
    }

    #[test]
    fn test_compare_doubles_vs_ints() {
        assert!(close(0.0, 2.0, 2));
        assert!(close(0.00001, 2.0, 2));
        assert!(close(1000.0, 2.0, 2));
        assert!(close(1.00001, 2.0, 3));
        assert!(!close(1000.0, 2.0, 1003));
        assert!(close(0.5, 7u8, 7.25f32));
    }

    #[test]
    fn test_infinite_tolerance_still_rejects_non_finite() {
        assert!(close(f64::INFINITY, -1.0e300, 1.0e300));
        assert!(!close(f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert!(!close(f64::INFINITY, 1.0, f64::NAN));
    }

    #[test]
    fn test_negative_tolerance() {
        let err = tolerance(-0.05).unwrap_err();
        assert_eq!(err, ConfigError::NegativeTolerance(-0.05));
        assert_eq!(err.to_string(), "tolerance (-0.05) cannot be negative");
    }

    #[test]
    fn test_negative_zero_tolerance() {
        let rel = tolerance(-0.0).unwrap();
        assert_eq!(rel.to_string(), "is a finite number within 0 of");
        assert!(rel.value().is_sign_positive());
        assert!(Relation::<f64, f64>::compare(&rel, Some(&-0.0), Some(&0.0)).unwrap());
    }

    #[test]
    fn test_nan_tolerance() {
        let err = tolerance(f64::NAN).unwrap_err();
        assert!(matches!(err, ConfigError::NanTolerance(_)));
        assert_eq!(err.to_string(), "tolerance (NaN) is not a number");
    }

    #[test]
    fn test_absent_operands() {
        let rel = tolerance(0.05).unwrap();
        let err = Relation::<f64, f64>::compare(&rel, Some(&1.0), None).unwrap_err();
        assert!(matches!(
            err,
            RelationError::AbsentOperand {
                side: Side::Expected
            }
        ));
        let err = Relation::<f64, f64>::compare(&rel, None, Some(&2.0)).unwrap_err();
        assert!(matches!(
            err,
            RelationError::AbsentOperand { side: Side::Actual }
        ));
    }

    #[test]
    fn test_description() {
        let rel = tolerance(0.05).unwrap();
        assert_eq!(rel.to_string(), "is a finite number within 0.05 of");
        assert!((rel.value() - 0.05).abs() < f64::EPSILON);
        assert!(Relation::<f64, f64>::format_diff(&rel, Some(&1.0), Some(&2.0)).is_none());
    }
}
