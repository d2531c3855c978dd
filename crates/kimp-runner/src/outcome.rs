//! Outcome classification: turning a final configuration into an exit
//! code and a list of raw error entries.

use crate::{PrettyPrinter, RunResult};
use kimp_term::{decode, Configuration, ERRORS_CELL, EXIT_CODE_CELL, K_CELL};

/// Sentinel exit code for a stuck evaluation: 128 + signal 11, the
/// framework convention for a "crashed" run. IMP programs themselves exit
/// in the 0–255 range, so 139 is reserved for this harness.
pub const STUCK_EXIT_CODE: i32 = 139;

/// The result of postprocessing one run. Constructed once, printed by the
/// caller, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Process exit code: the program's own exit code, or
    /// [`STUCK_EXIT_CODE`].
    pub exit_code: i32,
    /// Diagnostic messages, in the order the semantics produced them.
    pub errors: Vec<String>,
}

/// Classify a final configuration as completed or stuck.
///
/// The emptiness of the control cell is the *only* signal: an empty
/// continuation means the run completed, anything else means the engine
/// got stuck mid-step. A stuck run short-circuits to exit code 139 with
/// exactly one synthetic diagnostic (the pretty-printed configuration,
/// minus bookkeeping cells) no matter what the errors cell holds.
///
/// In the completed case the exit code defaults to 0 when the exit-code
/// cell is absent or non-normal, and the error list to empty when the
/// errors cell is absent; list elements that do not decode as strings are
/// silently dropped.
pub fn classify<P: PrettyPrinter>(config: &Configuration, printer: &P) -> RunResult<Outcome> {
    let k_cell = config.require_cell(K_CELL)?;
    if !k_cell.is_empty_sequence() {
        let pretty = printer.render(config.without_generated_cells().root())?;
        return Ok(Outcome {
            exit_code: STUCK_EXIT_CODE,
            errors: vec![format!(
                "Failed to evaluate program; stuck config is:\n{pretty}"
            )],
        });
    }

    let exit_code = config
        .cell(EXIT_CODE_CELL)
        .and_then(decode::as_int)
        .unwrap_or(0) as i32;
    let errors = config
        .cell(ERRORS_CELL)
        .map(|cell| decode::string_list(decode::flatten_list(cell)))
        .unwrap_or_default();

    Ok(Outcome { exit_code, errors })
}
