//! Parsers for the sequences the command-line interface compares.
//!
//! Sequences are JSON arrays. Each entry becomes an [`json::Element`];
//! `null` entries become absent elements.
//!
//! ## Example
//!
//! ```rust
//! use correspond::parsing::json::parse_sequence_text;
//!
//! let elements = parse_sequence_text(r#"["foot", "barn", null]"#).unwrap();
//! assert_eq!(elements.len(), 3);
//! assert!(elements[2].is_none());
//! ```

pub mod json;
