//! Reordering a matrix by a permutation, and putting cleaned rows back.

use crate::{Error, Permutation, Result, SimilarityMatrix};

fn check_order_len(input: &SimilarityMatrix, permutation: &Permutation) -> Result<()> {
    if permutation.len() != input.size() {
        return Err(Error::permutation(format!(
            "permutation has {} entries for a {1}x{1} matrix",
            permutation.len(),
            input.size()
        )));
    }
    Ok(())
}

/// `output[x, y] = input[p[x], p[y]]`, diagonal included.
pub fn rearrange(input: &SimilarityMatrix, permutation: &Permutation) -> Result<SimilarityMatrix> {
    check_order_len(input, permutation)?;
    Ok(SimilarityMatrix::from_fn(input.size(), |x, y| {
        input.get(permutation[x], permutation[y])
    }))
}

/// Same as [`rearrange`], writing into a caller-supplied matrix of equal size.
pub fn rearrange_into(
    input: &SimilarityMatrix,
    output: &mut SimilarityMatrix,
    permutation: &Permutation,
) -> Result<()> {
    if output.size() != input.size() {
        return Err(Error::shape(format!(
            "output is {0}x{0}, input is {1}x{1}",
            output.size(),
            input.size()
        )));
    }
    check_order_len(input, permutation)?;

    for x in 0..input.size() {
        let src_row = input.row(permutation[x]);
        for y in 0..input.size() {
            output.set(x, y, src_row[permutation[y]]);
        }
    }
    Ok(())
}

/// Expands a compacted matrix back to `original_size`, placing row/column `x`
/// at original index `kept[x]`. Removed coordinates are set to `fill`.
pub fn reinsert(
    compacted: &SimilarityMatrix,
    kept: &[usize],
    original_size: usize,
    fill: f64,
) -> Result<SimilarityMatrix> {
    if kept.len() != compacted.size() {
        return Err(Error::shape(format!(
            "{} kept indices for a {1}x{1} matrix",
            kept.len(),
            compacted.size()
        )));
    }
    if let Some(&idx) = kept.iter().find(|&&idx| idx >= original_size) {
        return Err(Error::invalid_input(format!(
            "kept index {idx} is out of range for size {original_size}"
        )));
    }

    let mut output = SimilarityMatrix::filled(original_size, fill);
    for (x, &row) in kept.iter().enumerate() {
        for (y, &col) in kept.iter().enumerate() {
            output.set(row, col, compacted.get(x, y));
        }
    }
    Ok(output)
}
