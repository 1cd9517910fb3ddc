//! Relations between actual and expected elements.
//!
//! This module provides the leaf types of the engine:
//!
//! - [`Relation`]: a named, possibly failing binary predicate plus an optional diff hook
//! - [`Correspondence`]: a relation built from closures (predicate or transforms)
//! - [`Tolerance`]: numeric closeness within a non-negative tolerance
//! - [`RelationError`], [`ConfigError`]: evaluation errors vs. configuration errors
//!
//! ## Absent Elements
//!
//! Sequences may contain absent elements (`None`). Relations receive both
//! operands as `Option` and decide for themselves whether absence is a valid
//! operand:
//!
//! | Factory | Absent actual | Absent expected |
//! |---------|---------------|-----------------|
//! | `from_predicate` | error | error |
//! | `transforming` | error | compared as a value |
//! | `transforming_both` | error | error |
//! | `tolerance` | error | error |
//! | `from_fn` | caller decides | caller decides |
//!
//! A transform returning `None` is a valid transformed value and is distinct
//! from both an absent element and an error.

pub mod correspondence;
pub mod relation;
pub mod tolerance;

pub use correspondence::Correspondence;
pub use relation::{Relation, RelationError, Side};
pub use tolerance::{tolerance, ConfigError, Tolerance};
