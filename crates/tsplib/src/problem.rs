//! TSPLIB problem header and a streaming `FULL_MATRIX` edge-weight writer.

use std::io::Write;

use crate::{TsplibError, TsplibResult, keyword_writer::KeywordWriter};
use tsplib_derive::TsplibDisplay;

const EDGE_WEIGHT_SECTION: &str = "EDGE_WEIGHT_SECTION";
const EOF_MARKER: &str = "EOF";

/// TSPLIB `TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibDisplay)]
pub enum ProblemType {
    Tsp,
}

/// TSPLIB `EDGE_WEIGHT_TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibDisplay)]
pub enum EdgeWeightType {
    Explicit,
}

/// TSPLIB `EDGE_WEIGHT_FORMAT` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibDisplay)]
pub enum EdgeWeightFormat {
    FullMatrix,
}

/// TSPLIB `EDGE_DATA_FORMAT` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibDisplay)]
pub enum EdgeDataFormat {
    EdgeList,
}

/// TSPLIB `NODE_COORD_TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibDisplay)]
pub enum NodeCoordType {
    NoCoords,
}

/// TSPLIB `DISPLAY_DATA_TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibDisplay)]
pub enum DisplayDataType {
    NoDisplay,
}

/// Header block of a TSPLIB problem file.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemHeader {
    pub name: String,
    pub problem_type: ProblemType,
    pub comment_lines: Vec<String>,
    pub dimension: usize,
    pub edge_weight_type: Option<EdgeWeightType>,
    pub edge_data_format: Option<EdgeDataFormat>,
    pub edge_weight_format: Option<EdgeWeightFormat>,
    pub node_coord_type: Option<NodeCoordType>,
    pub display_data_type: Option<DisplayDataType>,
}

impl ProblemHeader {
    pub fn new(name: impl Into<String>, problem_type: ProblemType, dimension: usize) -> Self {
        Self {
            name: name.into(),
            problem_type,
            comment_lines: Vec::new(),
            dimension,
            edge_weight_type: None,
            edge_data_format: None,
            edge_weight_format: None,
            node_coord_type: None,
            display_data_type: None,
        }
    }

    /// Symmetric TSP with an explicit `FULL_MATRIX` edge-weight table and no
    /// coordinates.
    pub fn explicit_full_matrix(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            edge_weight_type: Some(EdgeWeightType::Explicit),
            edge_data_format: Some(EdgeDataFormat::EdgeList),
            edge_weight_format: Some(EdgeWeightFormat::FullMatrix),
            node_coord_type: Some(NodeCoordType::NoCoords),
            display_data_type: Some(DisplayDataType::NoDisplay),
            ..Self::new(name, ProblemType::Tsp, dimension)
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment_lines.push(comment.into());
        self
    }

    fn write_to<W: Write>(&self, writer: &mut KeywordWriter<W>) -> std::io::Result<()> {
        writer.kv_colon("NAME", &self.name)?;
        writer.kv_colon("TYPE", self.problem_type)?;
        for comment in &self.comment_lines {
            writer.kv_colon("COMMENT", comment)?;
        }
        writer.kv_colon("DIMENSION", self.dimension)?;
        writer.opt_kv_colon("EDGE_WEIGHT_TYPE", self.edge_weight_type)?;
        writer.opt_kv_colon("EDGE_DATA_FORMAT", self.edge_data_format)?;
        writer.opt_kv_colon("EDGE_WEIGHT_FORMAT", self.edge_weight_format)?;
        writer.opt_kv_colon("NODE_COORD_TYPE", self.node_coord_type)?;
        writer.opt_kv_colon("DISPLAY_DATA_TYPE", self.display_data_type)
    }
}

/// Streams an explicit full-matrix problem: header, `dimension` rows of
/// `dimension` integer weights, then `EOF`.
///
/// Rows are written as they arrive so the weight table never has to exist in
/// memory as a whole.
pub struct FullMatrixWriter<W: Write> {
    writer: KeywordWriter<W>,
    dimension: usize,
    rows_written: usize,
}

impl<W: Write> FullMatrixWriter<W> {
    pub fn begin(out: W, header: &ProblemHeader) -> TsplibResult<Self> {
        if header.edge_weight_format != Some(EdgeWeightFormat::FullMatrix) {
            return Err(TsplibError::invalid_input(
                "FullMatrixWriter requires EDGE_WEIGHT_FORMAT: FULL_MATRIX",
            ));
        }

        let mut writer = KeywordWriter::new(out);
        header.write_to(&mut writer)?;
        writer.line(EDGE_WEIGHT_SECTION)?;

        Ok(Self {
            writer,
            dimension: header.dimension,
            rows_written: 0,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn write_row(&mut self, row: impl IntoIterator<Item = i64>) -> TsplibResult<()> {
        if self.rows_written == self.dimension {
            return Err(TsplibError::invalid_input(format!(
                "EDGE_WEIGHT_SECTION already has {} rows",
                self.dimension
            )));
        }

        let written = self.writer.row(row)?;
        if written != self.dimension {
            return Err(TsplibError::invalid_input(format!(
                "row {} has {written} weights, expected {}",
                self.rows_written, self.dimension
            )));
        }

        self.rows_written += 1;
        Ok(())
    }

    /// Writes the `EOF` marker, flushes, and hands back the sink.
    pub fn finish(mut self) -> TsplibResult<W> {
        if self.rows_written != self.dimension {
            return Err(TsplibError::invalid_input(format!(
                "EDGE_WEIGHT_SECTION has {} rows, expected {}",
                self.rows_written, self.dimension
            )));
        }

        self.writer.line(EOF_MARKER)?;
        let mut out = self.writer.into_inner();
        out.flush()?;
        Ok(out)
    }
}
