use std::fmt;

use thiserror::Error;

/// Which operand of a comparison something refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Actual,
    Expected,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actual => write!(f, "actual"),
            Self::Expected => write!(f, "expected"),
        }
    }
}

/// Error raised while evaluating a relation for a single pair of elements.
///
/// These are data, not bugs: the pairing matrix records them per cell and
/// keeps evaluating the remaining cells.
#[derive(Error, Debug)]
pub enum RelationError {
    /// The relation cannot handle an absent (`null`) operand
    #[error("{side} operand was absent")]
    AbsentOperand { side: Side },

    /// An error raised by caller-supplied code
    #[error("{0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A plain-text failure
    #[error("{0}")]
    Message(String),
}

impl RelationError {
    pub fn absent(side: Side) -> Self {
        Self::AbsentOperand { side }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn failed(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed(error.into())
    }

    /// Stable type name used when reporting the error in a failure description
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AbsentOperand { .. } => "AbsentOperand",
            Self::Failed(_) => "Failed",
            Self::Message(_) => "Message",
        }
    }
}

/// A named, possibly failing binary predicate between an actual-side element
/// type `A` and an expected-side element type `E`.
///
/// Operands are passed as `Option` because sequences may contain absent
/// elements; each relation decides whether absence is a valid operand or an
/// error.
///
/// Relations model behavior rather than values, so no implementation in this
/// crate is `PartialEq` or `Hash`.
pub trait Relation<A, E> {
    /// Decide whether `actual` corresponds to `expected`.
    ///
    /// # Errors
    ///
    /// Returns a [`RelationError`] when the relation is not defined for the
    /// given operands (for example an absent operand).
    fn compare(&self, actual: Option<&A>, expected: Option<&E>) -> Result<bool, RelationError>;

    /// Human-readable fragment such as "starts with", used verbatim in
    /// failure descriptions
    fn description(&self) -> &str;

    /// Best-effort explanation of how `actual` differs from `expected`.
    ///
    /// Never fails; `None` means no diff is available.
    fn format_diff(&self, _actual: Option<&A>, _expected: Option<&E>) -> Option<String> {
        None
    }
}

impl<A, E, R: Relation<A, E> + ?Sized> Relation<A, E> for &R {
    fn compare(&self, actual: Option<&A>, expected: Option<&E>) -> Result<bool, RelationError> {
        (**self).compare(actual, expected)
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn format_diff(&self, actual: Option<&A>, expected: Option<&E>) -> Option<String> {
        (**self).format_diff(actual, expected)
    }
}

impl<A, E, R: Relation<A, E> + ?Sized> Relation<A, E> for Box<R> {
    fn compare(&self, actual: Option<&A>, expected: Option<&E>) -> Result<bool, RelationError> {
        (**self).compare(actual, expected)
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn format_diff(&self, actual: Option<&A>, expected: Option<&E>) -> Option<String> {
        (**self).format_diff(actual, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(RelationError::absent(Side::Actual).kind(), "AbsentOperand");
        assert_eq!(RelationError::message("boom").kind(), "Message");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        assert_eq!(RelationError::failed(io).kind(), "Failed");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RelationError::absent(Side::Actual).to_string(),
            "actual operand was absent"
        );
        assert_eq!(
            RelationError::absent(Side::Expected).to_string(),
            "expected operand was absent"
        );
        assert_eq!(RelationError::failed("bad input").to_string(), "bad input");
    }

    #[test]
    fn test_failed_keeps_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = RelationError::failed(io);
        assert!(err.source().is_some());
    }
}
