//! Solver solution files: the node count on the first line, followed by the
//! zero-based tour as whitespace-separated ids (Concorde's `-o` output).

use std::{
    fmt::{Display, Formatter},
    fs,
    path::Path,
};

use crate::{TsplibError, TsplibResult, keyword_writer::KeywordWriter};

const NODES_PER_LINE: usize = 10;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SolutionTour {
    pub dimension: usize,
    /// Zero-based node ids in visiting order.
    pub nodes: Vec<usize>,
}

impl SolutionTour {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self {
            dimension: nodes.len(),
            nodes,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> TsplibResult<Self> {
        Self::from_text(&fs::read_to_string(path)?)
    }

    pub fn from_text(text: &str) -> TsplibResult<Self> {
        Self::parse(text, None)
    }

    /// Parses a tour whose first line must declare exactly `dimension` nodes.
    ///
    /// The declared count is checked before any tour token is read, so a
    /// mismatched file fails with [`TsplibError::DimensionMismatch`] rather
    /// than a token error.
    pub fn from_text_expecting(text: &str, dimension: usize) -> TsplibResult<Self> {
        Self::parse(text, Some(dimension))
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> TsplibResult<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    fn parse(text: &str, expected: Option<usize>) -> TsplibResult<Self> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| TsplibError::invalid_data("empty tour file"))?;
        let dimension: usize = header.parse().map_err(|e| {
            TsplibError::invalid_data(format!("Bad node count line '{header}': {e}"))
        })?;

        if let Some(expected) = expected
            && expected != dimension
        {
            return Err(TsplibError::DimensionMismatch {
                expected,
                found: dimension,
            });
        }

        let mut nodes = Vec::with_capacity(dimension);
        for token in lines.flat_map(str::split_whitespace) {
            let id: usize = token
                .parse()
                .map_err(|e| TsplibError::invalid_data(format!("Bad tour token '{token}': {e}")))?;
            nodes.push(id);
        }

        if nodes.len() != dimension {
            return Err(TsplibError::invalid_data(format!(
                "node count is {dimension}, but the tour lists {} nodes",
                nodes.len()
            )));
        }

        Ok(Self { dimension, nodes })
    }
}

impl Display for SolutionTour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = KeywordWriter::new(Vec::new());
        buf.line(self.dimension).map_err(|_| std::fmt::Error)?;
        buf.wrapped(&self.nodes, NODES_PER_LINE)
            .map_err(|_| std::fmt::Error)?;
        let text = String::from_utf8(buf.into_inner()).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::SolutionTour;
    use crate::TsplibError;

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("tsplib-tests-{name}-{nanos}"))
    }

    #[test]
    fn from_text_flattens_tokens_across_lines() {
        let tour = SolutionTour::from_text("5\n0 3 1\n4\n  2\n").expect("parse tour");
        assert_eq!(tour.dimension, 5);
        assert_eq!(tour.nodes, vec![0, 3, 1, 4, 2]);
    }

    #[test]
    fn from_text_rejects_malformed_token() {
        let err = SolutionTour::from_text("3\n0 x 2\n").expect_err("bad token should fail");
        assert!(err.to_string().contains("Bad tour token 'x'"));
    }

    #[test]
    fn from_text_rejects_negative_ids() {
        let err = SolutionTour::from_text("2\n0 -1\n").expect_err("negative id should fail");
        assert!(err.to_string().contains("Bad tour token '-1'"));
    }

    #[test]
    fn from_text_rejects_short_and_long_tours() {
        let short = SolutionTour::from_text("4\n0 1 2\n").expect_err("short tour should fail");
        assert!(short.to_string().contains("node count is 4, but the tour lists 3"));

        let long = SolutionTour::from_text("2\n0 1 2\n").expect_err("long tour should fail");
        assert!(long.to_string().contains("node count is 2, but the tour lists 3"));
    }

    #[test]
    fn from_text_rejects_missing_header() {
        let err = SolutionTour::from_text("\n  \n").expect_err("empty file should fail");
        assert!(err.to_string().contains("empty tour file"));

        let err = SolutionTour::from_text("3 0 1 2\n").expect_err("header with tokens");
        assert!(err.to_string().contains("Bad node count line"));
    }

    #[test]
    fn from_text_expecting_checks_count_before_tokens() {
        let err = SolutionTour::from_text_expecting("5\n0 1 2 3\n", 4)
            .expect_err("count mismatch should fail");
        assert!(matches!(
            err,
            TsplibError::DimensionMismatch {
                expected: 4,
                found: 5
            }
        ));
    }

    #[test]
    fn display_wraps_ten_nodes_per_line() {
        let tour = SolutionTour::new((0..12).collect());
        assert_eq!(
            tour.to_string(),
            "12\n0 1 2 3 4 5 6 7 8 9\n10 11\n"
        );
    }

    #[test]
    fn write_to_file_round_trips_through_from_file() {
        let dir = unique_temp_dir("tour-file");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("problem.tour");

        let tour = SolutionTour::new(vec![2, 0, 3, 1]);
        tour.write_to_file(&path).expect("write tour");
        assert_eq!(SolutionTour::from_file(&path).expect("read tour"), tour);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }
}
