//! Runner error types.

use kimp_term::MissingCellError;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that abort a run.
///
/// Two things are deliberately *not* errors: a cell value that fails to
/// decode (silently dropped), and a stuck evaluation (reported as an
/// [`crate::Outcome`] with exit code 139).
#[derive(Debug, Error)]
pub enum RunError {
    /// A structurally required cell was absent from the final configuration.
    #[error(transparent)]
    MissingCell(#[from] MissingCellError),

    /// The parser executable could not be spawned.
    #[error("failed to spawn parser {path}: {source}")]
    ParserSpawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The parser executable exited non-zero. Not retried.
    #[error("parser {path} failed with {status}")]
    ParserFailed { path: PathBuf, status: ExitStatus },

    /// The parser produced output that is not UTF-8.
    #[error("parser produced non-UTF-8 output: {0}")]
    ParserOutput(#[from] std::string::FromUtf8Error),

    /// The execution engine collaborator failed.
    #[error("engine error: {0}")]
    Engine(String),

    /// The pretty-printer collaborator failed.
    #[error("pretty-printer error: {0}")]
    PrettyPrint(String),

    /// An error entry claimed to embed a serialized term that could not be
    /// decoded. This signals an engine/semantics defect and is never
    /// suppressed.
    #[error("malformed embedded diagnostic {entry:?}: {reason}")]
    MalformedDiagnostic { entry: String, reason: String },
}

/// Result alias for runner operations.
pub type RunResult<T> = Result<T, RunError>;
