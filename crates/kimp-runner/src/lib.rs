//! KIMP runner: the `parse → execute → postprocess` pipeline.
//!
//! ```text
//! .imp file → [parser process] → kore pattern → [engine] → configuration
//!           → classify → (exit code, raw errors) → format → Outcome
//! ```
//!
//! The parser, engine and pretty-printer are external collaborators,
//! abstracted as capability traits so that tests can substitute doubles
//! and deployments can pick process-spawning adapters.

mod collaborators;
mod diagnostics;
mod error;
mod outcome;
mod process;
mod runner;

pub use collaborators::{Engine, KorePattern, PrettyPrinter, ProgramParser, PGM_VAR};
pub use diagnostics::{format_error, KORE_MARKER};
pub use error::{RunError, RunResult};
pub use outcome::{classify, Outcome, STUCK_EXIT_CODE};
pub use process::{KastPrinter, KrunEngine, ParserProcess, PARSER_BIN};
pub use runner::Kimp;
