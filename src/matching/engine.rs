use tracing::debug;

use crate::core::relation::Relation;
use crate::matching::matrix::{ComparisonError, PairingMatrix};

/// Every actual element paired with exactly one expected element and vice versa
#[derive(Debug, Clone)]
pub struct FullMatch {
    /// `pairs[i]` is the expected index paired with actual index `i`
    pairs: Vec<usize>,

    /// Whether actual element `i` corresponds to expected element `i`,
    /// taken from the matrix so the order check never re-invokes the relation
    pub(crate) positional: Vec<bool>,
}

impl FullMatch {
    /// (actual index, expected index) pairs, by ascending actual index
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied().enumerate()
    }

    #[must_use]
    pub fn expected_index_for(&self, actual_index: usize) -> Option<usize> {
        self.pairs.get(actual_index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A maximum matching that leaves elements unpaired on at least one side
#[derive(Debug)]
pub struct PartialMatch {
    /// (actual index, expected index) pairs of the maximum matching
    pub pairs: Vec<(usize, usize)>,

    /// Actual indices with no partner, ascending
    pub unexpected: Vec<usize>,

    /// Expected indices with no partner, ascending
    pub missing: Vec<usize>,

    /// The first error raised while evaluating the matrix, if any
    pub error: Option<ComparisonError>,
}

/// Result of matching two sequences under a relation.
///
/// A full match never carries an error: if every element could be paired
/// through `Match` cells alone, no errored cell was needed, so any error
/// captured while evaluating the matrix is dropped. A partial match always
/// carries the representative error when one was recorded.
#[derive(Debug)]
pub enum MatchOutcome {
    Full(FullMatch),
    Partial(PartialMatch),
}

impl MatchOutcome {
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&ComparisonError> {
        match self {
            Self::Full(_) => None,
            Self::Partial(partial) => partial.error.as_ref(),
        }
    }
}

/// Result of looking for at least one actual element that corresponds to a
/// single expected element
#[derive(Debug)]
pub enum ContainsOutcome {
    /// Index of the first corresponding actual element
    Found(usize),
    NotFound { error: Option<ComparisonError> },
}

impl ContainsOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Compute a maximum bipartite matching over the `Match` cells of `matrix`.
///
/// Errored and non-matching cells are not edges. Uses augmenting paths
/// (Kuhn's algorithm) with actual indices tried in ascending order and
/// expected candidates scanned in ascending order, so identical matrices
/// always produce identical outcomes.
#[must_use]
pub fn solve(mut matrix: PairingMatrix) -> MatchOutcome {
    let (n_actual, n_expected) = matrix.dimensions();
    let owner = maximum_matching(&matrix);

    let mut partner: Vec<Option<usize>> = vec![None; n_actual];
    for (j, i) in owner.iter().enumerate() {
        if let Some(i) = *i {
            partner[i] = Some(j);
        }
    }

    let unexpected: Vec<usize> = (0..n_actual).filter(|&i| partner[i].is_none()).collect();
    let missing: Vec<usize> = (0..n_expected).filter(|&j| owner[j].is_none()).collect();
    let matched = n_actual - unexpected.len();

    debug!(
        matched,
        unexpected = unexpected.len(),
        missing = missing.len(),
        "solved matching"
    );

    if unexpected.is_empty() && missing.is_empty() {
        let pairs: Vec<usize> = partner.into_iter().flatten().collect();
        let positional = (0..n_actual).map(|i| matrix.is_match(i, i)).collect();
        return MatchOutcome::Full(FullMatch { pairs, positional });
    }

    let pairs = partner
        .iter()
        .enumerate()
        .filter_map(|(i, j)| j.map(|j| (i, j)))
        .collect();

    MatchOutcome::Partial(PartialMatch {
        pairs,
        unexpected,
        missing,
        error: matrix.take_first_error(),
    })
}

/// For each expected index, the actual index it is paired with
fn maximum_matching(matrix: &PairingMatrix) -> Vec<Option<usize>> {
    let (n_actual, n_expected) = matrix.dimensions();
    let adjacency: Vec<Vec<usize>> = (0..n_actual)
        .map(|i| matrix.matches_for(i).collect())
        .collect();

    let mut owner: Vec<Option<usize>> = vec![None; n_expected];
    for actual in 0..n_actual {
        let mut visited = vec![false; n_expected];
        try_augment(actual, &adjacency, &mut owner, &mut visited);
    }
    owner
}

fn try_augment(
    actual: usize,
    adjacency: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &expected in &adjacency[actual] {
        if visited[expected] {
            continue;
        }
        visited[expected] = true;

        let available = match owner[expected] {
            None => true,
            Some(other) => try_augment(other, adjacency, owner, visited),
        };
        if available {
            owner[expected] = Some(actual);
            return true;
        }
    }
    false
}

/// Check that `actual` and `expected` can be paired one-to-one under `relation`.
pub fn contains_exactly<A, E, R>(
    actual: &[Option<A>],
    expected: &[Option<E>],
    relation: &R,
) -> MatchOutcome
where
    R: Relation<A, E> + ?Sized,
{
    solve(PairingMatrix::evaluate(actual, expected, relation))
}

/// Check that at least one actual element corresponds to `expected`.
///
/// Every actual element is compared exactly once, in order. As with a full
/// match, an error raised for some element is not reported when another
/// element corresponds.
pub fn contains_any<A, E, R>(
    actual: &[Option<A>],
    expected: &Option<E>,
    relation: &R,
) -> ContainsOutcome
where
    R: Relation<A, E> + ?Sized,
{
    let mut matrix = PairingMatrix::evaluate(actual, std::slice::from_ref(expected), relation);
    match (0..actual.len()).find(|&i| matrix.is_match(i, 0)) {
        Some(index) => ContainsOutcome::Found(index),
        None => ContainsOutcome::NotFound {
            error: matrix.take_first_error(),
        },
    }
}
