//! Writes a similarity matrix as a dummy-augmented symmetric TSP instance.
//!
//! Node `n` is a dummy with zero distance to every real node, so an optimal
//! closed tour breaks at the dummy into an optimal open path.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tsplib::problem::{FullMatrixWriter, ProblemHeader};

use crate::{Result, SimilarityMatrix, algo::distance::SimilarityToDistance};

const PROBLEM_NAME: &str = "SORT";

/// Streams the instance into `out` row by row and hands the sink back.
pub fn encode<W, D>(
    matrix: &SimilarityMatrix,
    distance: &D,
    comment: &str,
    out: W,
) -> Result<W>
where
    W: Write,
    D: SimilarityToDistance + ?Sized,
{
    let n = matrix.size();
    let header = ProblemHeader::explicit_full_matrix(PROBLEM_NAME, n + 1).with_comment(comment);
    let mut writer = FullMatrixWriter::begin(out, &header)?;

    for row in matrix.rows() {
        let weights = row
            .iter()
            // Solvers read 32-bit weights; out-of-range values saturate.
            .map(|&s| i64::from(distance.convert(s) as i32))
            .chain(std::iter::once(0));
        writer.write_row(weights)?;
    }
    writer.write_row(std::iter::repeat_n(0, n + 1))?;

    Ok(writer.finish()?)
}

pub fn encode_to_string<D>(matrix: &SimilarityMatrix, distance: &D, comment: &str) -> Result<String>
where
    D: SimilarityToDistance + ?Sized,
{
    let bytes = encode(matrix, distance, comment, Vec::new())?;
    String::from_utf8(bytes).map_err(|e| crate::Error::other(format!("non-utf8 problem text: {e}")))
}

pub fn write_problem_file<D>(
    path: &Path,
    matrix: &SimilarityMatrix,
    distance: &D,
    comment: &str,
) -> Result<()>
where
    D: SimilarityToDistance + ?Sized,
{
    let file = File::create(path)?;
    encode(matrix, distance, comment, BufWriter::new(file))?;
    log::debug!(
        "encode: wrote problem={} dimension={}",
        path.display(),
        matrix.size() + 1
    );
    Ok(())
}
