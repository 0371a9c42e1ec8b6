//! Reads a solver tour over the dummy-augmented instance back into an order
//! over the real nodes.

use std::{fs, path::Path};

use tsplib::tour::SolutionTour;

use crate::{Error, Permutation, Result};

/// A tour over `n` real nodes with the dummy (node `n`) taken out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedTour {
    permutation: Permutation,
    /// Position in `permutation` where the dummy sat, i.e. the number of
    /// real nodes that came before it.
    dummy_index: usize,
}

impl ParsedTour {
    pub fn from_file(path: &Path, n: usize) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::parse(format!("failed to read tour file {}: {e}", path.display()))
        })?;
        Self::from_text(&text, n)
    }

    /// `text` must declare `n + 1` nodes and list each of `0..=n` once.
    pub fn from_text(text: &str, n: usize) -> Result<Self> {
        let tour = SolutionTour::from_text_expecting(text, n + 1)?;
        Self::from_solution(&tour, n)
    }

    pub fn from_solution(tour: &SolutionTour, n: usize) -> Result<Self> {
        let mut order = Vec::with_capacity(n);
        let mut dummy_index = None;

        for (pos, &node) in tour.nodes.iter().enumerate() {
            if node != n {
                order.push(node);
                continue;
            }
            if dummy_index.is_some() {
                return Err(Error::permutation(format!(
                    "dummy node {n} appears more than once (again at tour position {pos})"
                )));
            }
            dummy_index = Some(order.len());
        }

        let Some(dummy_index) = dummy_index else {
            return Err(Error::permutation(format!(
                "tour does not visit the dummy node {n}"
            )));
        };

        Ok(Self {
            permutation: Permutation::new(order)?,
            dummy_index,
        })
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn dummy_index(&self) -> usize {
        self.dummy_index
    }

    pub fn into_permutation(self) -> Permutation {
        self.permutation
    }

    /// The order rotated so it starts at the node that followed the dummy.
    pub fn normalized(&self) -> Permutation {
        self.permutation.rotated(self.dummy_index)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::ParsedTour;
    use crate::{Error, Permutation};

    fn unique_temp_dir(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("matrix-sort-tests-{name}-{nanos}"))
    }

    #[test]
    fn dummy_is_removed_and_its_position_recorded() {
        let tour = ParsedTour::from_text("5\n2 0 4\n3 1\n", 4).expect("parse tour");

        assert_eq!(tour.permutation().as_slice(), &[2, 0, 3, 1]);
        assert_eq!(tour.dummy_index(), 2);
        assert_eq!(tour.normalized().as_slice(), &[3, 1, 2, 0]);
    }

    #[test]
    fn dummy_at_every_position_is_recorded() {
        let known = [1, 3, 0, 2];
        for k in 0..=known.len() {
            let mut nodes: Vec<String> = known.iter().map(usize::to_string).collect();
            nodes.insert(k, "4".to_string());
            let text = format!("5\n{}\n", nodes.join(" "));

            let tour = ParsedTour::from_text(&text, 4).expect("parse tour");
            assert_eq!(tour.permutation().as_slice(), &known);
            assert_eq!(tour.dummy_index(), k);
        }
    }

    #[test]
    fn rotation_by_zero_and_by_n_is_identity() {
        let leading = ParsedTour::from_text("4\n3 2 0 1\n", 3).expect("parse tour");
        assert_eq!(leading.dummy_index(), 0);
        assert_eq!(leading.normalized(), *leading.permutation());

        let trailing = ParsedTour::from_text("4\n2 0 1 3\n", 3).expect("parse tour");
        assert_eq!(trailing.dummy_index(), 3);
        assert_eq!(trailing.normalized(), *trailing.permutation());
    }

    #[test]
    fn count_mismatch_is_reported_before_tokens() {
        let err = ParsedTour::from_text("5\n0 1 2 3 x\n", 3).expect_err("count mismatch");
        assert!(matches!(
            err,
            Error::NodeCountMismatch {
                expected: 4,
                found: 5
            }
        ));
    }

    #[test]
    fn malformed_and_short_tours_are_parse_errors() {
        let err = ParsedTour::from_text("4\n0 1 x 3\n", 3).expect_err("bad token");
        assert!(matches!(err, Error::Parse(_)));

        let err = ParsedTour::from_text("4\n0 1 3\n", 3).expect_err("short tour");
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_or_repeated_dummy_is_a_permutation_error() {
        let err = ParsedTour::from_text("4\n0 1 2 1\n", 3).expect_err("no dummy");
        assert!(matches!(err, Error::Permutation(_)));

        let err = ParsedTour::from_text("4\n3 0 3 1\n", 3).expect_err("two dummies");
        assert!(matches!(err, Error::Permutation(_)));

        let err = ParsedTour::from_text("4\n3 0 0 1\n", 3).expect_err("repeated node");
        assert!(matches!(err, Error::Permutation(_)));

        let err = ParsedTour::from_text("4\n3 0 7 1\n", 3).expect_err("node out of range");
        assert!(matches!(err, Error::Permutation(_)));
    }

    #[test]
    fn from_file_reads_tour_and_reports_missing_file() {
        let dir = unique_temp_dir("tour");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("problem.tour");
        fs::write(&path, "3\n1 2 0\n").expect("write tour");

        let tour = ParsedTour::from_file(&path, 2).expect("parse tour file");
        assert_eq!(tour.into_permutation(), Permutation::new(vec![1, 0]).expect("valid"));

        let err = ParsedTour::from_file(&dir.join("missing.tour"), 2).expect_err("missing file");
        assert!(matches!(err, Error::Parse(_)));

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }
}
