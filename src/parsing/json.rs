use std::fmt;
use std::io::Read;
use std::path::Path;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::utils::validation::{check_element_limit, MAX_ELEMENTS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array but found {0}")]
    NotAnArray(&'static str),

    #[error("{0}")]
    TooManyElements(String),
}

/// A JSON value used as a sequence element.
///
/// Strings display without quotes so failure descriptions read naturally;
/// every other value displays as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(pub Value);

impl Element {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<usize> for Element {
    fn from(value: usize) -> Self {
        Self(Value::from(value))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl ToPrimitive for Element {
    fn to_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.as_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// JSON `null` is an absent element
fn to_element(value: Value) -> Option<Element> {
    match value {
        Value::Null => None,
        other => Some(Element(other)),
    }
}

/// Parse a JSON array from a file. Use `-` to read from stdin.
///
/// # Errors
///
/// Returns `ParseError::Io` if the input cannot be read, or other parse errors
/// if the content is not a JSON array within the element limit.
pub fn parse_sequence_file(path: &Path) -> Result<Vec<Option<Element>>, ParseError> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    parse_sequence_text(&content)
}

/// Parse a JSON array into a sequence of elements; `null` entries are absent.
///
/// # Errors
///
/// Returns `ParseError::Json` for invalid JSON, `ParseError::NotAnArray` if
/// the top-level value is not an array, or `ParseError::TooManyElements` if
/// the limit is exceeded.
pub fn parse_sequence_text(text: &str) -> Result<Vec<Option<Element>>, ParseError> {
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        other => return Err(ParseError::NotAnArray(kind_of(&other))),
    };

    let mut elements = Vec::with_capacity(items.len().min(MAX_ELEMENTS));
    for item in items {
        if let Some(message) = check_element_limit(elements.len()) {
            return Err(ParseError::TooManyElements(message));
        }
        elements.push(to_element(item));
    }

    debug!(
        elements = elements.len(),
        absent = elements.iter().filter(|e| e.is_none()).count(),
        "parsed sequence"
    );
    Ok(elements)
}

/// Parse a single element given inline on the command line.
///
/// Text that is not valid JSON is taken as a plain string, so `foo` and
/// `"foo"` are the same element. `null` is the absent element.
#[must_use]
pub fn parse_element_text(text: &str) -> Option<Element> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => to_element(value),
        Err(e) => {
            debug!(error = %e, "element is not JSON; using it as a string");
            Some(Element::from(text))
        }
    }
}
