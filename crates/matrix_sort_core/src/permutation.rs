use std::{
    fmt::{Display, Formatter},
    ops::Index,
};

use crate::{Error, Result};

/// Bijection over `[0, n)`: `order[i]` is the source index placed at target
/// position `i`. Only validated orders can be constructed.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn new(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for (pos, &idx) in order.iter().enumerate() {
            if idx >= n {
                return Err(Error::permutation(format!(
                    "index {idx} at position {pos} is out of range for length {n}"
                )));
            }
            if seen[idx] {
                return Err(Error::permutation(format!(
                    "index {idx} appears more than once (again at position {pos})"
                )));
            }
            seen[idx] = true;
        }
        Ok(Self(order))
    }

    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// The permutation that undoes this one: `inverse[self[i]] == i`.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.len()];
        for (pos, &idx) in self.0.iter().enumerate() {
            inverse[idx] = pos;
        }
        Self(inverse)
    }

    /// Left rotation: `result[(i + n - offset % n) % n] = self[i]`, so the
    /// entry at `offset` moves to position 0. Offsets are taken modulo `n`.
    pub fn rotated(&self, offset: usize) -> Self {
        let mut rotated = self.0.clone();
        if !rotated.is_empty() {
            let n = rotated.len();
            rotated.rotate_left(offset % n);
        }
        Self(rotated)
    }

    /// Maps every entry through `indices`, e.g. compacted positions back to
    /// original matrix indices.
    pub fn map_indices(&self, indices: &[usize]) -> Vec<usize> {
        self.0.iter().map(|&idx| indices[idx]).collect()
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Display for Permutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (pos, idx) in self.0.iter().enumerate() {
            if pos > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}
