use tracing::{debug, trace};

use crate::core::relation::{Relation, RelationError};

/// Outcome of evaluating the relation for one (actual, expected) pair
#[derive(Debug)]
pub enum Cell {
    Match,
    NoMatch,
    Errored(RelationError),
}

impl Cell {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// A relation error together with the cell it was raised for
#[derive(Debug)]
pub struct ComparisonError {
    pub actual_index: usize,
    pub expected_index: usize,
    pub error: RelationError,
}

/// The relation evaluated for every (actual, expected) index pair.
///
/// Cells are evaluated exactly once, in row-major order (actual index
/// ascending, then expected index ascending). The first errored cell in that
/// order is the representative error of the whole matrix.
#[derive(Debug)]
pub struct PairingMatrix {
    cells: Vec<Cell>,
    n_actual: usize,
    n_expected: usize,
    first_error: Option<(usize, usize)>,
}

impl PairingMatrix {
    /// Evaluate `relation` for every pair of elements.
    pub fn evaluate<A, E, R>(actual: &[Option<A>], expected: &[Option<E>], relation: &R) -> Self
    where
        R: Relation<A, E> + ?Sized,
    {
        let mut cells = Vec::with_capacity(actual.len() * expected.len());
        let mut first_error = None;

        for (i, a) in actual.iter().enumerate() {
            for (j, e) in expected.iter().enumerate() {
                let cell = match relation.compare(a.as_ref(), e.as_ref()) {
                    Ok(true) => Cell::Match,
                    Ok(false) => Cell::NoMatch,
                    Err(err) => {
                        trace!(actual_index = i, expected_index = j, error = %err, "compare failed");
                        first_error.get_or_insert((i, j));
                        Cell::Errored(err)
                    }
                };
                cells.push(cell);
            }
        }

        let matrix = Self {
            cells,
            n_actual: actual.len(),
            n_expected: expected.len(),
            first_error,
        };

        debug!(
            relation = relation.description(),
            n_actual = matrix.n_actual,
            n_expected = matrix.n_expected,
            matches = matrix.match_count(),
            errors = matrix.errored_count(),
            "evaluated pairing matrix"
        );

        matrix
    }

    /// (number of actual elements, number of expected elements)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.n_actual, self.n_expected)
    }

    #[must_use]
    pub fn cell(&self, actual_index: usize, expected_index: usize) -> Option<&Cell> {
        if actual_index >= self.n_actual || expected_index >= self.n_expected {
            return None;
        }
        self.cells.get(actual_index * self.n_expected + expected_index)
    }

    #[must_use]
    pub fn is_match(&self, actual_index: usize, expected_index: usize) -> bool {
        self.cell(actual_index, expected_index)
            .is_some_and(Cell::is_match)
    }

    /// Expected indices that the given actual element corresponds to, ascending
    pub fn matches_for(&self, actual_index: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_expected).filter(move |&j| self.is_match(actual_index, j))
    }

    /// The representative error: the first errored cell in row-major order
    #[must_use]
    pub fn first_error(&self) -> Option<(usize, usize, &RelationError)> {
        let (i, j) = self.first_error?;
        match self.cell(i, j) {
            Some(Cell::Errored(err)) => Some((i, j, err)),
            _ => None,
        }
    }

    #[must_use]
    pub fn match_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_match()).count()
    }

    #[must_use]
    pub fn errored_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Errored(_)))
            .count()
    }

    /// Move the representative error out of the matrix.
    pub(crate) fn take_first_error(&mut self) -> Option<ComparisonError> {
        let (i, j) = self.first_error.take()?;
        let slot = &mut self.cells[i * self.n_expected + j];
        match std::mem::replace(slot, Cell::NoMatch) {
            Cell::Errored(error) => Some(ComparisonError {
                actual_index: i,
                expected_index: j,
                error,
            }),
            other => {
                *slot = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::correspondence::Correspondence;

    fn prefix() -> Correspondence<&'static str, &'static str> {
        Correspondence::from_predicate(|a: &&str, e: &&str| a.starts_with(*e), "starts with")
    }

    #[test]
    fn test_cells_classified() {
        let actual = vec![Some("foot"), Some("barn")];
        let expected = vec![Some("foo"), Some("bar")];
        let matrix = PairingMatrix::evaluate(&actual, &expected, &prefix());

        assert_eq!(matrix.dimensions(), (2, 2));
        assert!(matrix.is_match(0, 0));
        assert!(!matrix.is_match(0, 1));
        assert!(!matrix.is_match(1, 0));
        assert!(matrix.is_match(1, 1));
        assert_eq!(matrix.match_count(), 2);
        assert!(matrix.first_error().is_none());
        assert!(matrix.cell(2, 0).is_none());
        assert!(matrix.cell(0, 2).is_none());
    }

    #[test]
    fn test_row_major_order_each_cell_once() {
        let calls: Rc<RefCell<Vec<(i32, i32)>>> = Rc::default();
        let log = Rc::clone(&calls);
        let rel = Correspondence::from_predicate(
            move |a: &i32, e: &i32| {
                log.borrow_mut().push((*a, *e));
                a == e
            },
            "is equal to",
        );

        let actual = vec![Some(1), Some(2), Some(3)];
        let expected = vec![Some(10), Some(20)];
        let _ = PairingMatrix::evaluate(&actual, &expected, &rel);

        assert_eq!(
            *calls.borrow(),
            vec![(1, 10), (1, 20), (2, 10), (2, 20), (3, 10), (3, 20)]
        );
    }

    #[test]
    fn test_first_error_is_row_major_first() {
        // Errors at (0, 2) and (1, 2) and (2, 0); (0, 2) comes first
        let actual = vec![Some("a"), Some("b"), None];
        let expected = vec![Some("a"), Some("b"), None];
        let matrix = PairingMatrix::evaluate(&actual, &expected, &prefix());

        let (i, j, err) = matrix.first_error().unwrap();
        assert_eq!((i, j), (0, 2));
        assert_eq!(err.kind(), "AbsentOperand");
        assert_eq!(matrix.errored_count(), 5);
    }

    #[test]
    fn test_evaluation_continues_after_error() {
        let actual = vec![None, Some("foot")];
        let expected = vec![Some("foo")];
        let matrix = PairingMatrix::evaluate(&actual, &expected, &prefix());

        assert!(matches!(matrix.cell(0, 0), Some(Cell::Errored(_))));
        assert!(matrix.is_match(1, 0));
    }

    #[test]
    fn test_take_first_error() {
        let actual = vec![Some("foot"), None];
        let expected = vec![Some("foot")];
        let mut matrix = PairingMatrix::evaluate(&actual, &expected, &prefix());

        let taken = matrix.take_first_error().unwrap();
        assert_eq!((taken.actual_index, taken.expected_index), (1, 0));
        assert!(matrix.take_first_error().is_none());
        assert!(matrix.first_error().is_none());
    }

    #[test]
    fn test_empty_sequences() {
        let actual: Vec<Option<&str>> = Vec::new();
        let expected = vec![Some("foo")];
        let matrix = PairingMatrix::evaluate(&actual, &expected, &prefix());
        assert_eq!(matrix.dimensions(), (0, 1));
        assert_eq!(matrix.match_count(), 0);
        assert_eq!(matrix.matches_for(0).count(), 0);
    }
}
