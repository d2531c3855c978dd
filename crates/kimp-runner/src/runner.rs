//! The run orchestrator.

use crate::{
    classify, format_error, Engine, KastPrinter, KrunEngine, Outcome, ParserProcess,
    PrettyPrinter, ProgramParser, RunResult, PGM_VAR,
};
use kimp_term::Configuration;
use std::collections::BTreeMap;
use std::path::Path;

/// Composes the external parser, engine and pretty-printer into the
/// `run → postprocess` pipeline.
///
/// Holds no cross-call state: each [`Kimp::run_file`] call is independent
/// and the pipeline is synchronous and blocking throughout.
pub struct Kimp<R, E, P> {
    parser: R,
    engine: E,
    printer: P,
}

impl Kimp<ParserProcess, KrunEngine, KastPrinter> {
    /// Wire up the process-spawning adapters against a compiled
    /// definition directory.
    pub fn with_definition_dir(definition_dir: impl AsRef<Path>) -> Self {
        let dir = definition_dir.as_ref();
        Self::new(
            ParserProcess::new(dir),
            KrunEngine::new(dir),
            KastPrinter::new(dir),
        )
    }
}

impl<R: ProgramParser, E: Engine, P: PrettyPrinter> Kimp<R, E, P> {
    pub fn new(parser: R, engine: E, printer: P) -> Self {
        Self {
            parser,
            engine,
            printer,
        }
    }

    /// Run one IMP source file to an [`Outcome`].
    pub fn run_file(&self, file: &Path) -> RunResult<Outcome> {
        let pgm = self.parser.parse_program(file)?;
        let bindings = BTreeMap::from([(PGM_VAR.to_string(), pgm)]);
        let config = self.engine.run_config(&bindings)?;
        self.postprocess(&config)
    }

    /// Interpret a final configuration: classify it, then format each
    /// diagnostic in its original order.
    pub fn postprocess(&self, config: &Configuration) -> RunResult<Outcome> {
        let raw = classify(config, &self.printer)?;
        let errors = raw
            .errors
            .iter()
            .map(|entry| format_error(entry, &self.printer))
            .collect::<RunResult<Vec<_>>>()?;
        Ok(Outcome {
            exit_code: raw.exit_code,
            errors,
        })
    }
}
