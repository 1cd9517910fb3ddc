//! Matching engine: pairing matrix, bipartite solver, order check and
//! failure descriptions.
//!
//! This module provides the core matching functionality:
//!
//! - [`PairingMatrix`]: the relation evaluated once for every (actual, expected) pair
//! - [`solve`]: maximum bipartite matching over the corresponding pairs
//! - [`FullMatch::verify_order`]: positional re-check after a full match
//! - [`Failure`]: structured description of a failed check
//!
//! ## Matching Algorithm
//!
//! 1. **Matrix evaluation**: every cell is evaluated in row-major order and
//!    classified as `Match`, `NoMatch` or `Errored`. The first errored cell is
//!    kept as the representative error.
//! 2. **Bipartite matching**: Kuhn's augmenting-path algorithm over `Match`
//!    cells, visiting indices in ascending order so results are deterministic.
//! 3. **Outcome**: a full match when every element on both sides is paired;
//!    otherwise the unpaired actual elements are *unexpected* and the unpaired
//!    expected elements are *missing*.
//! 4. **Order check** (optional): only after a full match, walk both
//!    sequences in lock-step.
//!
//! ## Errors
//!
//! The representative error is attached to every partial match and never to a
//! full match. A full match proves that no errored cell was needed.
//!
//! ## Example
//!
//! ```rust
//! use correspond::Correspondence;
//! use correspond::matching::{check_exactly, contains_exactly, MatchOutcome};
//!
//! let prefix = Correspondence::from_predicate(
//!     |actual: &&str, expected: &&str| actual.starts_with(*expected),
//!     "starts with",
//! );
//!
//! let actual = vec![Some("foot"), Some("barn"), Some("gallon")];
//! let expected = vec![Some("foot"), Some("barn")];
//!
//! match contains_exactly(&actual, &expected, &prefix) {
//!     MatchOutcome::Full(_) => unreachable!(),
//!     MatchOutcome::Partial(partial) => assert_eq!(partial.unexpected, vec![2]),
//! }
//!
//! let failure = check_exactly(&actual, &expected, &prefix).unwrap_err();
//! assert!(failure.headline().ends_with("It has unexpected elements <[gallon]>"));
//! ```

pub mod diagnosis;
pub mod engine;
pub mod matrix;
pub mod order;

pub use diagnosis::{
    check_contains, check_exactly, check_exactly_in_order, check_pair, Fact, Failure,
};
pub use engine::{
    contains_any, contains_exactly, solve, ContainsOutcome, FullMatch, MatchOutcome, PartialMatch,
};
pub use matrix::{Cell, ComparisonError, PairingMatrix};
pub use order::OrderOutcome;
