use thiserror::Error as ThisError;
use tsplib::TsplibError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("shape error: {0}")]
    Shape(String),
    #[error("tour parse error: {0}")]
    Parse(String),
    #[error("tour declares {found} nodes, expected {expected}")]
    NodeCountMismatch { expected: usize, found: usize },
    #[error("invalid permutation: {0}")]
    Permutation(String),
    #[error("{context}.\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")]
    ProcessFailed {
        context: String,
        stdout: String,
        stderr: String,
    },
    #[error("external solver: {0}")]
    ExternalProcess(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn permutation(message: impl Into<String>) -> Self {
        Self::Permutation(message.into())
    }

    pub fn external_process(message: impl Into<String>) -> Self {
        Self::ExternalProcess(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<TsplibError> for Error {
    fn from(value: TsplibError) -> Self {
        match value {
            TsplibError::Io(err) => Self::Io(err),
            TsplibError::InvalidInput(message) => Self::InvalidInput(message),
            TsplibError::InvalidData(message) => Self::Parse(message),
            TsplibError::DimensionMismatch { expected, found } => {
                Self::NodeCountMismatch { expected, found }
            }
            err @ TsplibError::Launch { .. } => Self::ExternalProcess(err.to_string()),
            TsplibError::ProcessFailed {
                context,
                stdout,
                stderr,
            } => Self::ProcessFailed {
                context,
                stdout,
                stderr,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use tsplib::TsplibError;

    use super::Error;

    #[test]
    fn tsplib_errors_map_onto_core_taxonomy() {
        let err: Error = TsplibError::invalid_data("Bad tour token 'x'").into();
        assert!(matches!(err, Error::Parse(_)));

        let err: Error = TsplibError::DimensionMismatch {
            expected: 4,
            found: 5,
        }
        .into();
        assert!(matches!(
            err,
            Error::NodeCountMismatch {
                expected: 4,
                found: 5
            }
        ));

        let err: Error = TsplibError::Launch {
            program: "concorde".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(matches!(err, Error::ExternalProcess(_)));
        assert!(err.to_string().contains("failed to launch concorde"));
    }
}
