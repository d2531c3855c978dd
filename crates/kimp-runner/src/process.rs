//! Process-spawning adapters for the external collaborators.
//!
//! All three wrap executables produced by the K build step. Calls are
//! synchronous and blocking with no timeout; a hung tool hangs the run.

use crate::{Engine, KorePattern, PrettyPrinter, ProgramParser, RunError, RunResult};
use kimp_term::{json, Configuration, Term};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Well-known name of the program parser inside the definition directory.
/// This is a contract with the build step that compiles the definition.
pub const PARSER_BIN: &str = "parser_Pgm_IMP-SYNTAX";

/// The concrete-syntax parser, spawned from the definition directory.
#[derive(Debug, Clone)]
pub struct ParserProcess {
    definition_dir: PathBuf,
}

impl ParserProcess {
    pub fn new(definition_dir: impl Into<PathBuf>) -> Self {
        Self {
            definition_dir: definition_dir.into(),
        }
    }

    fn parser_path(&self) -> PathBuf {
        self.definition_dir.join(PARSER_BIN)
    }
}

impl ProgramParser for ParserProcess {
    fn parse_program(&self, file: &Path) -> RunResult<KorePattern> {
        let path = self.parser_path();
        let output = Command::new(&path)
            .arg(file)
            .stdout(Stdio::piped())
            .output()
            .map_err(|source| RunError::ParserSpawn {
                path: path.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(RunError::ParserFailed {
                path,
                status: output.status,
            });
        }
        Ok(KorePattern::new(String::from_utf8(output.stdout)?))
    }
}

/// The rewrite engine, via `krun`.
///
/// The serialized program term is passed pre-parsed (`-pVAR=cat`) and the
/// final configuration is read back as kast JSON.
#[derive(Debug, Clone)]
pub struct KrunEngine {
    definition_dir: PathBuf,
}

impl KrunEngine {
    pub fn new(definition_dir: impl Into<PathBuf>) -> Self {
        Self {
            definition_dir: definition_dir.into(),
        }
    }
}

impl Engine for KrunEngine {
    fn run_config(&self, bindings: &BTreeMap<String, KorePattern>) -> RunResult<Configuration> {
        let mut command = Command::new("krun");
        command
            .arg("--definition")
            .arg(&self.definition_dir)
            .arg("--output")
            .arg("json");
        for (var, pattern) in bindings {
            command.arg(format!("-c{var}={}", pattern.text()));
            command.arg(format!("-p{var}=cat"));
        }

        let stdout = run_tool(command, None).map_err(RunError::Engine)?;
        let term = json::term_from_json(&stdout)
            .map_err(|err| RunError::Engine(format!("bad krun output: {err}")))?;
        Ok(Configuration::new(term))
    }
}

/// The pretty-printer, via `kast`: kore text in, kast JSON out for
/// decoding, and kast JSON in, pretty text out for rendering.
#[derive(Debug, Clone)]
pub struct KastPrinter {
    definition_dir: PathBuf,
}

impl KastPrinter {
    pub fn new(definition_dir: impl Into<PathBuf>) -> Self {
        Self {
            definition_dir: definition_dir.into(),
        }
    }

    fn kast_command(&self, input: &str, output: &str) -> Command {
        let mut command = Command::new("kast");
        command
            .arg("--definition")
            .arg(&self.definition_dir)
            .arg("--input")
            .arg(input)
            .arg("--output")
            .arg(output)
            .arg("/dev/stdin");
        command
    }
}

impl PrettyPrinter for KastPrinter {
    fn parse_term(&self, text: &str) -> RunResult<Term> {
        let stdout =
            run_tool(self.kast_command("kore", "json"), Some(text)).map_err(RunError::PrettyPrint)?;
        json::term_from_json(&stdout)
            .map_err(|err| RunError::PrettyPrint(format!("bad kast output: {err}")))
    }

    fn render(&self, term: &Term) -> RunResult<String> {
        let input = json::term_to_json(term)
            .map_err(|err| RunError::PrettyPrint(err.to_string()))?;
        run_tool(self.kast_command("json", "pretty"), Some(&input)).map_err(RunError::PrettyPrint)
    }
}

/// Spawn a K tool, optionally feeding `input` on stdin, and capture its
/// stdout. Failures come back as display text for the caller to wrap in
/// the right [`RunError`] variant.
fn run_tool(mut command: Command, input: Option<&str>) -> Result<String, String> {
    let program = command.get_program().to_string_lossy().into_owned();
    command.stdout(Stdio::piped()).stderr(Stdio::piped());
    command.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = command
        .spawn()
        .map_err(|err| format!("failed to spawn {program}: {err}"))?;
    if let (Some(text), Some(stdin)) = (input, child.stdin.as_mut()) {
        stdin
            .write_all(text.as_bytes())
            .map_err(|err| format!("failed to write to {program}: {err}"))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|err| format!("failed to wait for {program}: {err}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{program} failed with {}: {}",
            output.status,
            stderr.trim()
        ));
    }
    String::from_utf8(output.stdout).map_err(|err| format!("{program} output not UTF-8: {err}"))
}
