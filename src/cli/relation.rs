use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::correspondence::Correspondence;
use crate::core::relation::{Relation, RelationError, Side};
use crate::core::tolerance::{ConfigError, Tolerance};
use crate::parsing::json::Element;

/// A named relation between JSON elements, selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelationSpec {
    /// Elements are equal JSON values; `null` equals `null`
    Equals,
    /// Actual string starts with the expected string
    StartsWith,
    /// Actual string ends with the expected string
    EndsWith,
    /// Actual string contains the expected string
    ContainsText,
    /// Actual string has the expected number of characters
    Length,
    /// Strings are equal after lowercasing both
    IgnoringCase,
    /// Numbers are finite and within the given tolerance
    Tolerance(f64),
}

impl FromStr for RelationSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "equals" => Ok(Self::Equals),
            "starts-with" => Ok(Self::StartsWith),
            "ends-with" => Ok(Self::EndsWith),
            "contains-text" => Ok(Self::ContainsText),
            "length" => Ok(Self::Length),
            "ignoring-case" => Ok(Self::IgnoringCase),
            other => {
                let Some(value) = other.strip_prefix("tolerance:") else {
                    return Err(ConfigError::UnknownRelation(s.to_string()));
                };
                let tolerance: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidToleranceValue(value.to_string()))?;
                // Reject negative and NaN tolerances up front
                Ok(Self::Tolerance(Tolerance::new(tolerance)?.value()))
            }
        }
    }
}

impl TryFrom<String> for RelationSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RelationSpec> for String {
    fn from(spec: RelationSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for RelationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals => write!(f, "equals"),
            Self::StartsWith => write!(f, "starts-with"),
            Self::EndsWith => write!(f, "ends-with"),
            Self::ContainsText => write!(f, "contains-text"),
            Self::Length => write!(f, "length"),
            Self::IgnoringCase => write!(f, "ignoring-case"),
            Self::Tolerance(t) => write!(f, "tolerance:{t}"),
        }
    }
}

impl RelationSpec {
    /// Build the relation this spec names.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid tolerance.
    pub fn build(&self) -> Result<Box<dyn Relation<Element, Element>>, ConfigError> {
        let relation: Box<dyn Relation<Element, Element>> = match *self {
            Self::Equals => Box::new(Correspondence::from_fn(
                |actual: Option<&Element>, expected: Option<&Element>| Ok(actual == expected),
                "is equal to",
            )),
            Self::StartsWith => Box::new(text_relation(|a, e| a.starts_with(e), "starts with")),
            Self::EndsWith => Box::new(text_relation(|a, e| a.ends_with(e), "ends with")),
            Self::ContainsText => Box::new(text_relation(|a, e| a.contains(e), "contains")),
            Self::Length => Box::new(Correspondence::transforming(
                |actual: &Element| actual.as_str().map(|s| Element::from(s.chars().count())),
                "has a length of",
            )),
            Self::IgnoringCase => Box::new(Correspondence::transforming_both(
                |actual: &Element| actual.as_str().map(str::to_lowercase),
                |expected: &Element| expected.as_str().map(str::to_lowercase),
                "is equal ignoring case to",
            )),
            Self::Tolerance(t) => Box::new(Tolerance::new(t)?),
        };
        Ok(relation)
    }
}

fn text(operand: Option<&Element>, side: Side) -> Result<&str, RelationError> {
    let element = operand.ok_or(RelationError::absent(side))?;
    element
        .as_str()
        .ok_or_else(|| RelationError::message(format!("{side} operand {element} is not a string")))
}

fn text_relation(
    predicate: fn(&str, &str) -> bool,
    description: &str,
) -> Correspondence<Element, Element> {
    Correspondence::from_fn(
        move |actual, expected| {
            let actual = text(actual, Side::Actual)?;
            let expected = text(expected, Side::Expected)?;
            Ok(predicate(actual, expected))
        },
        description,
    )
}
