//! External book builder invocation.
//!
//! Once the staging tree and index are in place the configured builder
//! (`mdbook build` by default) runs once, synchronously, from the project
//! root with inherited stdio. Its exit status is handed back untouched; no
//! retries, no timeout.

use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("No builder command configured")]
    EmptyCommand,
    #[error("Failed to run builder `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Run `command` (program followed by arguments) in `working_dir`.
///
/// A non-zero exit is not an error here; callers decide what to do with the
/// status.
pub fn run_builder(command: &[String], working_dir: &Path) -> Result<ExitStatus, BuilderError> {
    let (program, args) = command.split_first().ok_or(BuilderError::EmptyCommand)?;
    Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .status()
        .map_err(|source| BuilderError::Spawn {
            program: program.clone(),
            source,
        })
}

/// Exit code to report for a finished builder.
///
/// Signals and codes outside `u8` map to a generic failure of 1.
pub fn exit_code(status: &ExitStatus) -> u8 {
    if status.success() {
        return 0;
    }
    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .filter(|&code| code != 0)
        .unwrap_or(1)
}
