use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("input file {path:?} does not exist")]
    InputNotFound {
        path: PathBuf,
    },

    #[error("failed to read the input file {path:?}: {source}")]
    InputUnreadable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write the output to {path}: {source}")]
    OutputUnwritable {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("input contains no records")]
    EmptyInput,

    #[error("Malformed record at line {line}: expected {expected} but found {found}")]
    MalformedRecord {
        line:     usize,
        expected: &'static str,
        found:    String,
    },

    #[error("Unexpected end of input after line {line}: expected {expected}")]
    UnexpectedEndOfInput {
        line:     usize,
        expected: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
