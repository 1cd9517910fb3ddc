//! Centralized input limits.

/// Maximum number of elements accepted in a single input sequence.
///
/// The pairing matrix evaluates the relation for every (actual, expected)
/// pair, so two sequences at this limit already mean millions of comparisons.
pub const MAX_ELEMENTS: usize = 4_096;

/// Check if adding another element would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new element.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use correspond::utils::validation::{check_element_limit, MAX_ELEMENTS};
///
/// assert!(check_element_limit(0).is_none());
/// assert!(check_element_limit(MAX_ELEMENTS).is_some());
/// ```
#[must_use]
pub fn check_element_limit(count: usize) -> Option<String> {
    if count >= MAX_ELEMENTS {
        Some(format!(
            "Too many elements: a sequence may hold at most {MAX_ELEMENTS}"
        ))
    } else {
        None
    }
}
