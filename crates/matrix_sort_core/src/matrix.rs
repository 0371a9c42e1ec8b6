use std::io::Write;

use crate::{Error, Result};

/// Dense square similarity matrix stored row-major.
///
/// Values may be NaN. Only cleaning can produce a 0×0 matrix; constructors
/// used by callers reject empty input.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from rows, rejecting empty, ragged or non-square input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::shape("matrix has no rows"));
        }

        let mut values = Vec::with_capacity(size * size);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::shape(format!(
                    "matrix is not square: {size} rows, but row {idx} has {} columns",
                    row.len()
                )));
            }
            values.extend(row);
        }

        Ok(Self { size, values })
    }

    pub fn from_row_major(size: usize, values: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(Error::shape("matrix has no rows"));
        }
        if values.len() != size * size {
            return Err(Error::shape(format!(
                "expected {} values for a {size}x{size} matrix, got {}",
                size * size,
                values.len()
            )));
        }
        Ok(Self { size, values })
    }

    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            values: vec![value; size * size],
        }
    }

    pub(crate) fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                values.push(f(row, col));
            }
        }
        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// # Panics
    /// When `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.size && col < self.size,
            "index ({row}, {col}) out of range for {0}x{0} matrix",
            self.size
        );
        self.values[row * self.size + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.size + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size.
        self.values.chunks_exact(self.size.max(1))
    }

    /// Writes one row per line, values separated by single spaces.
    pub fn write_to<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for row in self.rows() {
            let mut first = true;
            for value in row {
                if first {
                    write!(out, "{value}")?;
                    first = false;
                } else {
                    write!(out, " {value}")?;
                }
            }
            writeln!(out)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::SimilarityMatrix;
    use crate::Error;

    #[test]
    fn from_rows_stores_values_row_major() {
        let m = SimilarityMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
            .expect("square matrix");
        assert_eq!(m.size(), 2);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn from_rows_rejects_non_square_input() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0]])
            .expect_err("2x3 should fail");
        assert!(matches!(err, Error::Shape(_)));
        assert!(err.to_string().contains("row 0 has 3 columns"));
    }

    #[test]
    fn from_rows_rejects_ragged_and_empty_input() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]])
            .expect_err("ragged should fail");
        assert!(err.to_string().contains("row 1 has 1 columns"));

        let err = SimilarityMatrix::from_rows(Vec::new()).expect_err("empty should fail");
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn from_row_major_checks_value_count() {
        let err = SimilarityMatrix::from_row_major(2, vec![1.0; 3]).expect_err("too few values");
        assert!(err.to_string().contains("expected 4 values"));
        assert!(SimilarityMatrix::from_row_major(2, vec![1.0; 4]).is_ok());
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let m = SimilarityMatrix::from_fn(0, |_, _| 1.0);
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    fn write_to_emits_space_separated_rows() {
        let m = SimilarityMatrix::from_rows(vec![vec![1.0, 0.25], vec![f64::NAN, 1.0]])
            .expect("matrix");
        let mut out = Vec::new();
        m.write_to(&mut out).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "1 0.25\nNaN 1\n");
    }
}
