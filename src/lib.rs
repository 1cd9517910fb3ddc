//! # correspond
//!
//! A library for checking that two sequences of values correspond one-to-one
//! under a user-supplied relation.
//!
//! Plain equality is often too strict for test assertions: a list of strings
//! should start with a list of prefixes, a list of measurements should be
//! within some tolerance of the reference values. `correspond` pairs each
//! actual element with exactly one expected element that it corresponds to,
//! and when no such pairing exists it explains why.
//!
//! ## Features
//!
//! - **Fallible relations**: Errors raised while comparing are recorded, not fatal
//! - **Maximum matching**: Finds a one-to-one pairing whenever one exists
//! - **Order checking**: Optionally requires the pairing to be positional
//! - **Diagnostics**: Names unexpected and missing elements and the first error
//! - **Numeric tolerance**: Compares numbers of any primitive type within a bound
//!
//! ## Example
//!
//! ```rust
//! use correspond::{check_exactly, Correspondence};
//!
//! let starts_with = Correspondence::from_predicate(
//!     |a: &String, e: &String| a.starts_with(e.as_str()),
//!     "starts with",
//! );
//!
//! let actual = vec![Some("foot".to_string()), Some("barn".to_string())];
//! let expected = vec![Some("bar".to_string()), Some("foo".to_string())];
//! assert!(check_exactly(&actual, &expected, &starts_with).is_ok());
//!
//! let expected = vec![Some("foo".to_string()), Some("baz".to_string())];
//! let failure = check_exactly(&actual, &expected, &starts_with).unwrap_err();
//! assert!(failure.headline().ends_with("It is missing an element that starts with <baz> and has unexpected elements <[barn]>"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Relations, the closure-based correspondence and numeric tolerance
//! - [`matching`]: Pairing matrix, matching solver, order check and diagnostics
//! - [`parsing`]: JSON input for the command-line tool
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::{tolerance, ConfigError, Correspondence, Relation, RelationError, Side, Tolerance};
pub use matching::{
    check_contains, check_exactly, check_exactly_in_order, check_pair, contains_any,
    contains_exactly, ContainsOutcome, Fact, Failure, FullMatch, MatchOutcome, OrderOutcome,
    PartialMatch,
};
