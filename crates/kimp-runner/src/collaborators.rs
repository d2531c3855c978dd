//! Capability traits for the external collaborators.
//!
//! The concrete-syntax parser, the rewrite engine and the pretty-printer
//! all live outside this crate. They are modelled as traits so any
//! deployment can substitute a process-spawning adapter (see the
//! `process` module), an in-process binding, or a test double.

use crate::RunResult;
use kimp_term::{Configuration, Term};
use std::collections::BTreeMap;
use std::path::Path;

/// The configuration variable the program term is bound to when the
/// engine is invoked.
pub const PGM_VAR: &str = "PGM";

/// An opaque serialized (kore) term, as produced by the parser and
/// consumed by the engine. The text is never inspected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KorePattern(String);

impl KorePattern {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// The concrete-syntax parser: source file to serialized program term.
pub trait ProgramParser {
    fn parse_program(&self, file: &Path) -> RunResult<KorePattern>;
}

/// The rewrite engine: runs a program to its final configuration.
pub trait Engine {
    /// Execute with the given initial-configuration variable bindings
    /// (the orchestrator binds the program under [`PGM_VAR`]).
    fn run_config(&self, bindings: &BTreeMap<String, KorePattern>) -> RunResult<Configuration>;
}

/// The pretty-printer: decodes serialized terms and renders terms as
/// human-readable text.
pub trait PrettyPrinter {
    /// Decode a serialized term (used for `::kore::`-embedded diagnostics).
    fn parse_term(&self, text: &str) -> RunResult<Term>;

    /// Render a term as human-readable text.
    fn render(&self, term: &Term) -> RunResult<String>;
}
