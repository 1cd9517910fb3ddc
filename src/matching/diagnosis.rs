use std::any::Any;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::core::relation::Relation;
use crate::matching::engine::{
    contains_any, contains_exactly, ContainsOutcome, MatchOutcome, PartialMatch,
};
use crate::matching::matrix::ComparisonError;
use crate::matching::order::OrderOutcome;

/// Key of the fact that introduces the representative error
pub const EXCEPTIONS_KEY: &str =
    "additionally, one or more exceptions were thrown while comparing elements";

/// Key of the fact holding the representative error
pub const FIRST_EXCEPTION_KEY: &str = "first exception";

/// One line of a failure description: a key with an optional value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Fact {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {value}", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// Structured description of a failed check.
///
/// The first fact is the headline; any further facts add detail. Rendering
/// to a console or report is left to the caller; `Display` gives one fact
/// per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub facts: Vec<Fact>,
}

impl Failure {
    #[must_use]
    pub fn headline(&self) -> &str {
        self.facts.first().map_or("", |f| f.key.as_str())
    }

    /// Keys of all facts, in order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.facts.iter().map(|f| f.key.as_str()).collect()
    }

    /// Value of the first fact with the given key
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value.as_deref())
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fact) in self.facts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{fact}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

/// Render an element, using `null` for an absent one.
///
/// Floating-point values keep their decimal point, so `3.0` renders as `3.0`
/// rather than `3`.
pub fn render<T: Display + 'static>(value: Option<&T>) -> String {
    let Some(value) = value else {
        return "null".to_string();
    };
    let any: &dyn Any = value;
    if let Some(x) = any.downcast_ref::<f64>() {
        format!("{x:?}")
    } else if let Some(x) = any.downcast_ref::<f32>() {
        format!("{x:?}")
    } else {
        value.to_string()
    }
}

/// Render a sequence as `[a, b, null]`
pub fn render_all<T: Display + 'static>(values: &[Option<T>]) -> String {
    let items: Vec<String> = values.iter().map(|v| render(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

fn render_indices<T: Display + 'static>(values: &[Option<T>], indices: &[usize]) -> String {
    let items: Vec<String> = indices
        .iter()
        .map(|&i| render(values[i].as_ref()))
        .collect();
    format!("[{}]", items.join(", "))
}

fn exception_facts<A: Display + 'static, E: Display + 'static>(
    actual: &[Option<A>],
    expected: &[Option<E>],
    error: Option<&ComparisonError>,
) -> Vec<Fact> {
    let Some(error) = error else {
        return Vec::new();
    };
    let value = format!(
        "compare({}, {}) threw {}: {}",
        render(actual[error.actual_index].as_ref()),
        render(expected[error.expected_index].as_ref()),
        error.error.kind(),
        error.error
    );
    vec![Fact::key(EXCEPTIONS_KEY), Fact::new(FIRST_EXCEPTION_KEY, value)]
}

/// Describe a failed one-to-one match.
pub fn describe_exact_failure<A, E, R>(
    actual: &[Option<A>],
    expected: &[Option<E>],
    relation: &R,
    partial: &PartialMatch,
) -> Failure
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    let description = relation.description();

    let missing = match partial.missing.as_slice() {
        [] => None,
        [only] => Some(format!(
            "is missing an element that {description} <{}>",
            render(expected[*only].as_ref())
        )),
        several => Some(format!(
            "is missing elements that {description} each of <{}>",
            render_indices(expected, several)
        )),
    };
    let unexpected = (!partial.unexpected.is_empty()).then(|| {
        format!(
            "has unexpected elements <{}>",
            render_indices(actual, &partial.unexpected)
        )
    });

    let detail = match (missing, unexpected) {
        (Some(m), Some(u)) => format!("It {m} and {u}"),
        (Some(m), None) => format!("It {m}"),
        (None, Some(u)) => format!("It {u}"),
        (None, None) => String::new(),
    };

    let headline = format!(
        "Not true that <{}> contains exactly one element that {description} each element of <{}>. {detail}",
        render_all(actual),
        render_all(expected),
    );

    let mut facts = vec![Fact::key(headline.trim_end())];
    facts.extend(exception_facts(actual, expected, partial.error.as_ref()));
    Failure { facts }
}

/// Describe a full match whose elements do not correspond position by position.
pub fn describe_order_failure<A, E, R>(
    actual: &[Option<A>],
    expected: &[Option<E>],
    relation: &R,
    position: usize,
) -> Failure
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    let description = relation.description();
    let headline = format!(
        "Not true that <{}> contains, in order, exactly one element that {description} each element of <{}>. \
         The elements correspond, but not in the expected order",
        render_all(actual),
        render_all(expected),
    );

    let mut facts = vec![Fact::key(headline)];
    for (i, e) in expected.iter().enumerate() {
        facts.push(Fact::new(
            format!("expected #{}", i + 1),
            format!("an element that {description} <{}>", render(e.as_ref())),
        ));
    }
    if let Some(a) = actual.get(position) {
        facts.push(Fact::new(
            "first out-of-order position",
            format!("#{}: <{}>", position + 1, render(a.as_ref())),
        ));
    }
    Failure { facts }
}

/// Describe a failed "contains at least one element" check.
pub fn describe_contains_failure<A, E, R>(
    actual: &[Option<A>],
    expected: &Option<E>,
    relation: &R,
    error: Option<&ComparisonError>,
) -> Failure
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    let headline = format!(
        "Not true that <{}> contains at least one element that {} <{}>",
        render_all(actual),
        relation.description(),
        render(expected.as_ref()),
    );
    let mut facts = vec![Fact::key(headline)];
    facts.extend(exception_facts(
        actual,
        std::slice::from_ref(expected),
        error,
    ));
    Failure { facts }
}

/// Check that `actual` and `expected` correspond one-to-one in any order.
///
/// # Errors
///
/// Returns a [`Failure`] naming the unexpected and missing elements.
pub fn check_exactly<A, E, R>(
    actual: &[Option<A>],
    expected: &[Option<E>],
    relation: &R,
) -> Result<(), Failure>
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    match contains_exactly(actual, expected, relation) {
        MatchOutcome::Full(_) => Ok(()),
        MatchOutcome::Partial(partial) => Err(describe_exact_failure(
            actual, expected, relation, &partial,
        )),
    }
}

/// Check that `actual` and `expected` correspond one-to-one and position by
/// position. The order is only checked once an unordered match succeeds.
///
/// # Errors
///
/// Returns a [`Failure`] for a failed match or for a match in the wrong order.
pub fn check_exactly_in_order<A, E, R>(
    actual: &[Option<A>],
    expected: &[Option<E>],
    relation: &R,
) -> Result<(), Failure>
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    match contains_exactly(actual, expected, relation) {
        MatchOutcome::Full(full) => match full.verify_order() {
            OrderOutcome::InOrder => Ok(()),
            OrderOutcome::OutOfOrder { position } => Err(describe_order_failure(
                actual, expected, relation, position,
            )),
        },
        MatchOutcome::Partial(partial) => Err(describe_exact_failure(
            actual, expected, relation, &partial,
        )),
    }
}

/// Check that at least one actual element corresponds to `expected`.
///
/// # Errors
///
/// Returns a [`Failure`] when no element corresponds.
pub fn check_contains<A, E, R>(
    actual: &[Option<A>],
    expected: &Option<E>,
    relation: &R,
) -> Result<(), Failure>
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    match contains_any(actual, expected, relation) {
        ContainsOutcome::Found(_) => Ok(()),
        ContainsOutcome::NotFound { error } => Err(describe_contains_failure(
            actual,
            expected,
            relation,
            error.as_ref(),
        )),
    }
}

/// Check a single pair of elements, appending the relation's diff to the
/// headline when one is available.
///
/// # Errors
///
/// Returns a [`Failure`] when the elements do not correspond or the relation
/// raises an error.
pub fn check_pair<A, E, R>(
    actual: &Option<A>,
    expected: &Option<E>,
    relation: &R,
) -> Result<(), Failure>
where
    A: Display + 'static,
    E: Display + 'static,
    R: Relation<A, E> + ?Sized,
{
    let mut headline = format!(
        "Not true that <{}> is an element that {} <{}>",
        render(actual.as_ref()),
        relation.description(),
        render(expected.as_ref()),
    );

    match relation.compare(actual.as_ref(), expected.as_ref()) {
        Ok(true) => Ok(()),
        Ok(false) => {
            if let Some(diff) = relation.format_diff(actual.as_ref(), expected.as_ref()) {
                headline.push_str(&format!(" ({diff})"));
            }
            Err(Failure {
                facts: vec![Fact::key(headline)],
            })
        }
        Err(error) => {
            let error = ComparisonError {
                actual_index: 0,
                expected_index: 0,
                error,
            };
            let mut facts = vec![Fact::key(headline)];
            facts.extend(exception_facts(
                std::slice::from_ref(actual),
                std::slice::from_ref(expected),
                Some(&error),
            ));
            Err(Failure { facts })
        }
    }
}
