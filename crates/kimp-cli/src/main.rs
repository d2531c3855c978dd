//! `kimp`: run IMP programs against the compiled K semantics.
//!
//! The process exit code is the sole success/failure signal: the IMP
//! program's own exit code on a completed run, 139 on a stuck evaluation,
//! 1 on a harness failure. Diagnostics go to stderr, one per line.

use clap::{Parser, Subcommand};
use kimp_runner::Kimp;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Environment fallback for `--definition-dir`.
const DEFINITION_DIR_ENV: &str = "KIMP_DEFINITION_DIR";

#[derive(Parser)]
#[command(name = "kimp", version, about = "IMP semantics runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an IMP program
    Run {
        /// Path to the compiled KIMP definition
        #[arg(long, value_name = "DIR")]
        definition_dir: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Path to the .imp file
        input_file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            definition_dir,
            verbose,
            input_file,
        } => exec_run(definition_dir, verbose, &input_file),
    }
}

fn exec_run(definition_dir: Option<PathBuf>, verbose: bool, input_file: &Path) -> ExitCode {
    let definition_dir =
        match resolve_definition_dir(definition_dir, env::var_os(DEFINITION_DIR_ENV)) {
            Some(dir) => dir,
            None => {
                eprintln!(
                    "Cannot find KIMP definition, please specify either \
                     --definition-dir or {DEFINITION_DIR_ENV}"
                );
                return ExitCode::FAILURE;
            }
        };

    if verbose {
        eprintln!(
            "running {} with definition {}",
            input_file.display(),
            definition_dir.display()
        );
    }

    let kimp = Kimp::with_definition_dir(&definition_dir);
    match kimp.run_file(input_file) {
        Ok(outcome) => {
            for error in &outcome.errors {
                eprintln!("{error}");
            }
            ExitCode::from(truncate_exit_code(outcome.exit_code))
        }
        Err(err) => {
            eprintln!("kimp: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the definition directory from the flag, falling back to the
/// environment. `None` means fail fast before any work is attempted.
fn resolve_definition_dir(flag: Option<PathBuf>, env_value: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| {
        env_value
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// POSIX exit codes carry 8 bits; anything wider wraps, matching what a
/// plain `exit(code)` would do.
fn truncate_exit_code(code: i32) -> u8 {
    (code & 0xff) as u8
}
