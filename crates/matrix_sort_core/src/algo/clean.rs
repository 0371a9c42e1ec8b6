//! Removal of degenerate rows/columns (all values NaN or exactly zero).
//!
//! Entries are compared to `0.0` exactly. Near-zero noise such as `1e-300`
//! keeps a row alive.

use std::borrow::Cow;

use crate::{Error, Permutation, Result, SimilarityMatrix};

/// Result of [`clean_matrix`]. `kept` and `removed` partition `[0, n)` and
/// are both ascending; row/column `x` of `matrix` is original index `kept[x]`.
#[derive(Clone, Debug)]
pub struct CleanedMatrix<'a> {
    pub matrix: Cow<'a, SimilarityMatrix>,
    pub removed: Vec<usize>,
    pub kept: Vec<usize>,
}

/// Removed indices grouped by the kept index they directly follow.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BadSuccessors {
    /// Removed indices before the first kept index.
    pub leading: Vec<usize>,
    /// `following[x]` are the removed indices between `kept[x]` and `kept[x + 1]`.
    pub following: Vec<Vec<usize>>,
}

fn is_good_row(row: &[f64]) -> bool {
    row.iter().any(|&value| !value.is_nan() && value != 0.0)
}

/// Splits rows into kept and removed, compacting the matrix when anything was
/// removed. Nothing removed means the input is borrowed back untouched.
pub fn clean_matrix(matrix: &SimilarityMatrix) -> CleanedMatrix<'_> {
    let n = matrix.size();
    let mut kept = Vec::with_capacity(n);
    let mut removed = Vec::new();

    for (idx, row) in matrix.rows().enumerate() {
        if is_good_row(row) {
            kept.push(idx);
        } else {
            removed.push(idx);
        }
    }

    log::debug!(
        "clean: n={n} kept={} removed={}",
        kept.len(),
        removed.len()
    );

    if removed.is_empty() {
        return CleanedMatrix {
            matrix: Cow::Borrowed(matrix),
            removed,
            kept,
        };
    }

    let compacted = SimilarityMatrix::from_fn(kept.len(), |x, y| matrix.get(kept[x], kept[y]));
    CleanedMatrix {
        matrix: Cow::Owned(compacted),
        removed,
        kept,
    }
}

impl CleanedMatrix<'_> {
    pub fn original_size(&self) -> usize {
        self.kept.len() + self.removed.len()
    }

    /// True when no row was removed and `matrix` is the caller's instance.
    pub fn is_unchanged(&self) -> bool {
        matches!(self.matrix, Cow::Borrowed(_))
    }

    /// `status[i]` is true when original index `i` was kept.
    pub fn section_status(&self) -> Vec<bool> {
        let mut status = vec![false; self.original_size()];
        for &idx in &self.kept {
            status[idx] = true;
        }
        status
    }

    pub fn bad_successors(&self) -> BadSuccessors {
        let mut successors = BadSuccessors {
            leading: Vec::new(),
            following: vec![Vec::new(); self.kept.len()],
        };

        // Both lists are ascending, so one merge pass assigns every removed
        // index to the last kept index below it.
        let mut slot: Option<usize> = None;
        let mut next_kept = 0;
        for &idx in &self.removed {
            while next_kept < self.kept.len() && self.kept[next_kept] < idx {
                slot = Some(next_kept);
                next_kept += 1;
            }
            match slot {
                Some(x) => successors.following[x].push(idx),
                None => successors.leading.push(idx),
            }
        }

        successors
    }

    /// Lifts an order over compacted positions to an order over all original
    /// indices: every removed index rides right behind the kept index it
    /// originally followed, and leading removed indices come first.
    pub fn expand_order(&self, order: &Permutation) -> Result<Permutation> {
        if order.len() != self.kept.len() {
            return Err(Error::permutation(format!(
                "order has {} entries, but {} indices were kept",
                order.len(),
                self.kept.len()
            )));
        }

        let successors = self.bad_successors();
        let mut expanded = Vec::with_capacity(self.original_size());
        expanded.extend_from_slice(&successors.leading);
        for x in order.iter() {
            expanded.push(self.kept[x]);
            expanded.extend_from_slice(&successors.following[x]);
        }
        Permutation::new(expanded)
    }
}
