use std::{fs, io::Read};

use crate::{Error, Result, SimilarityMatrix, options::SortOptions};

/// Reads the matrix from `--input`, or stdin when no input path is set.
pub fn read_matrix(options: &SortOptions) -> Result<SimilarityMatrix> {
    let text = match options.input_path() {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("failed to read input {}: {e}", path.display()))
        })?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    parse_matrix(&text)
}

/// One row per line, values separated by whitespace and/or commas.
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_matrix(text: &str) -> Result<SimilarityMatrix> {
    let mut rows = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .enumerate()
            .map(|(col, tok)| {
                tok.parse::<f64>().map_err(|_| {
                    Error::invalid_input(format!(
                        "Line {}, column {}: invalid number: {tok}",
                        line_idx + 1,
                        col + 1
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(Error::invalid_input("No matrix rows provided."));
    }

    SimilarityMatrix::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{parse_matrix, read_matrix};
    use crate::{Error, options::SortOptions};

    fn unique_temp_dir(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("matrix-sort-tests-{name}-{nanos}"))
    }

    #[test]
    fn parse_matrix_accepts_commas_spaces_comments_and_nan() {
        let m = parse_matrix("# similarity\n1, 0.5 nan\n\n0.5,1,NaN\n  nan nan 1\n").expect("parse");

        assert_eq!(m.size(), 3);
        assert_eq!(m.get(0, 1), 0.5);
        assert!(m.get(0, 2).is_nan());
        assert!(m.get(1, 2).is_nan());
        assert_eq!(m.get(2, 2), 1.0);
    }

    #[test]
    fn parse_matrix_rejects_empty_input() {
        let err = parse_matrix(" \n# only a comment\n").expect_err("empty input should fail");
        assert!(err.to_string().contains("No matrix rows provided."));
    }

    #[test]
    fn parse_matrix_rejects_non_numeric_values() {
        let err = parse_matrix("1 2\n3 x\n").expect_err("invalid number should fail");
        assert!(err.to_string().contains("Line 2, column 2: invalid number: x"));
    }

    #[test]
    fn parse_matrix_rejects_non_square_input() {
        let err = parse_matrix("1 2\n3\n").expect_err("ragged input should fail");
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn read_matrix_reads_input_file() {
        let dir = unique_temp_dir("input");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("sim.txt");
        fs::write(&path, "1 0\n0 1\n").expect("write input");

        let options = SortOptions {
            input: path.display().to_string(),
            ..SortOptions::default()
        };
        let m = read_matrix(&options).expect("read matrix");
        assert_eq!(m.size(), 2);

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }
}
