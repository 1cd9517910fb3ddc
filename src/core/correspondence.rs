use std::fmt;

use tracing::trace;

use crate::core::relation::{Relation, RelationError, Side};

type CompareFn<A, E> = dyn Fn(Option<&A>, Option<&E>) -> Result<bool, RelationError>;
type DiffFn<A, E> = dyn Fn(&A, &E) -> Result<String, RelationError>;

/// A [`Relation`] built from closures.
///
/// Use the factory functions to construct one:
///
/// - [`Correspondence::from_predicate`]: a plain two-argument predicate
/// - [`Correspondence::from_fn`]: a fallible predicate that also sees absent operands
/// - [`Correspondence::transforming`]: map the actual element, compare with the expected one
/// - [`Correspondence::transforming_both`]: map both sides to a common type
/// - [`Correspondence::try_transforming`] and [`Correspondence::try_transforming_both`]:
///   the same, for transforms that can fail
///
/// ```
/// use correspond::{Correspondence, Relation};
///
/// let prefix = Correspondence::from_predicate(
///     |actual: &String, expected: &String| actual.starts_with(expected.as_str()),
///     "starts with",
/// );
/// let (foot, foo) = ("foot".to_string(), "foo".to_string());
/// assert!(prefix.compare(Some(&foot), Some(&foo)).unwrap());
/// assert_eq!(prefix.to_string(), "starts with");
/// ```
///
/// A correspondence describes behavior, so it cannot be compared for equality
/// or used as a map key:
///
/// ```compile_fail
/// use correspond::Correspondence;
///
/// let a = Correspondence::from_predicate(|x: &i32, y: &i32| x == y, "equals");
/// let b = Correspondence::from_predicate(|x: &i32, y: &i32| x == y, "equals");
/// let _ = a == b;
/// ```
pub struct Correspondence<A, E> {
    compare: Box<CompareFn<A, E>>,
    description: String,
    diff: Option<Box<DiffFn<A, E>>>,
}

impl<A: 'static, E: 'static> Correspondence<A, E> {
    /// Wrap a fallible predicate that receives operands as `Option`, so it can
    /// give absent elements any meaning it likes.
    pub fn from_fn<F>(compare: F, description: impl Into<String>) -> Self
    where
        F: Fn(Option<&A>, Option<&E>) -> Result<bool, RelationError> + 'static,
    {
        Self {
            compare: Box::new(compare),
            description: description.into(),
            diff: None,
        }
    }

    /// Wrap a two-argument predicate.
    ///
    /// An absent operand on either side raises [`RelationError::AbsentOperand`].
    pub fn from_predicate<F>(predicate: F, description: impl Into<String>) -> Self
    where
        F: Fn(&A, &E) -> bool + 'static,
    {
        Self::from_fn(
            move |actual, expected| {
                let actual = actual.ok_or(RelationError::absent(Side::Actual))?;
                let expected = expected.ok_or(RelationError::absent(Side::Expected))?;
                Ok(predicate(actual, expected))
            },
            description,
        )
    }

    /// Map the actual element and compare the result with the expected element.
    ///
    /// `None` from the transform is a valid value that corresponds only to an
    /// absent expected element. An absent actual element raises
    /// [`RelationError::AbsentOperand`].
    pub fn transforming<F>(transform: F, description: impl Into<String>) -> Self
    where
        F: Fn(&A) -> Option<E> + 'static,
        E: PartialEq,
    {
        Self::try_transforming(move |actual| Ok(transform(actual)), description)
    }

    /// Like [`Correspondence::transforming`], for a transform that can fail.
    ///
    /// An `Err` from the transform is the result of the comparison, so the
    /// pairing matrix records it as an errored cell.
    pub fn try_transforming<F>(transform: F, description: impl Into<String>) -> Self
    where
        F: Fn(&A) -> Result<Option<E>, RelationError> + 'static,
        E: PartialEq,
    {
        Self::from_fn(
            move |actual, expected| {
                let actual = actual.ok_or(RelationError::absent(Side::Actual))?;
                Ok(transform(actual)?.as_ref() == expected)
            },
            description,
        )
    }

    /// Map both sides to a common type `U` and compare the results.
    ///
    /// Two `None` results correspond. Absent input elements on either side
    /// raise [`RelationError::AbsentOperand`].
    pub fn transforming_both<U, F, G>(
        actual_transform: F,
        expected_transform: G,
        description: impl Into<String>,
    ) -> Self
    where
        U: PartialEq,
        F: Fn(&A) -> Option<U> + 'static,
        G: Fn(&E) -> Option<U> + 'static,
    {
        Self::try_transforming_both(
            move |actual| Ok(actual_transform(actual)),
            move |expected| Ok(expected_transform(expected)),
            description,
        )
    }

    /// Like [`Correspondence::transforming_both`], for transforms that can fail.
    ///
    /// The actual side is transformed first; the first `Err` is the result
    /// of the comparison.
    pub fn try_transforming_both<U, F, G>(
        actual_transform: F,
        expected_transform: G,
        description: impl Into<String>,
    ) -> Self
    where
        U: PartialEq,
        F: Fn(&A) -> Result<Option<U>, RelationError> + 'static,
        G: Fn(&E) -> Result<Option<U>, RelationError> + 'static,
    {
        Self::from_fn(
            move |actual, expected| {
                let actual = actual.ok_or(RelationError::absent(Side::Actual))?;
                let expected = expected.ok_or(RelationError::absent(Side::Expected))?;
                Ok(actual_transform(actual)? == expected_transform(expected)?)
            },
            description,
        )
    }

    /// Attach a diff formatter used by [`Relation::format_diff`].
    ///
    /// Errors from the formatter, and absent operands, produce no diff.
    #[must_use]
    pub fn with_diff_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&A, &E) -> Result<String, RelationError> + 'static,
    {
        self.diff = Some(Box::new(formatter));
        self
    }
}

impl<A, E> Relation<A, E> for Correspondence<A, E> {
    fn compare(&self, actual: Option<&A>, expected: Option<&E>) -> Result<bool, RelationError> {
        (self.compare)(actual, expected)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn format_diff(&self, actual: Option<&A>, expected: Option<&E>) -> Option<String> {
        let formatter = self.diff.as_ref()?;
        let (actual, expected) = (actual?, expected?);
        match formatter(actual, expected) {
            Ok(diff) => Some(diff),
            Err(e) => {
                trace!(error = %e, "diff formatter failed; no diff available");
                None
            }
        }
    }
}

impl<A, E> fmt::Display for Correspondence<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<A, E> fmt::Debug for Correspondence<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Correspondence")
            .field("description", &self.description)
            .field("has_diff", &self.diff.is_some())
            .finish_non_exhaustive()
    }
}
