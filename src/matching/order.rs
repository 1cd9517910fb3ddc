//! Positional order check run after a full match.
//!
//! The check is deliberately strict: it walks both sequences in lock-step and
//! requires `actual[i]` to correspond to `expected[i]` for every `i`. It does
//! not look for some other order-respecting pairing among the possible full
//! matches, so a permutation that happens to correspond unordered but not
//! position by position is reported as out of order.

use tracing::debug;

use crate::matching::engine::FullMatch;

/// Result of the positional order check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutcome {
    InOrder,
    /// `position` is the first index whose actual element does not
    /// correspond to the expected element at the same index
    OutOfOrder { position: usize },
}

impl OrderOutcome {
    #[must_use]
    pub fn is_in_order(&self) -> bool {
        matches!(self, Self::InOrder)
    }
}

impl FullMatch {
    /// Check whether the matched sequences also correspond position by position.
    ///
    /// Uses the cells recorded while evaluating the pairing matrix, so the
    /// relation is not invoked again. An errored positional cell counts as not
    /// corresponding.
    #[must_use]
    pub fn verify_order(&self) -> OrderOutcome {
        let outcome = match self.positional.iter().position(|&ok| !ok) {
            None => OrderOutcome::InOrder,
            Some(position) => OrderOutcome::OutOfOrder { position },
        };
        debug!(?outcome, "verified order");
        outcome
    }
}
