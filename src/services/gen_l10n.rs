use std::path::Path;
use std::process::Command;

use serde::Serialize;

use crate::error::{ArbError, Result};

pub const GEN_L10N_ARG: &str = "gen-l10n";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an external program to completion.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> Result<ToolOutput>;
}

/// [`ToolRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> Result<ToolOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .output()
            .map_err(|e| ArbError::Tool(format!("failed to run {program}: {e}")))?;

        Ok(ToolOutput {
            // killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// `<program> gen-l10n` inside the Flutter project.
pub fn run(runner: &dyn ToolRunner, program: &str, project_dir: &Path) -> Result<ToolOutput> {
    if !project_dir.is_dir() {
        return Err(ArbError::validation(format!(
            "flutter project path is not a directory: {}",
            project_dir.display()
        )));
    }

    let output = runner.run(program, &[GEN_L10N_ARG], project_dir)?;

    if output.success() {
        tracing::info!("{program} {GEN_L10N_ARG} completed successfully");
        if !output.stdout.trim().is_empty() {
            tracing::info!("{}", output.stdout.trim_end());
        }
    } else {
        tracing::error!("{program} {GEN_L10N_ARG} failed with exit code {}", output.exit_code);
        if !output.stderr.trim().is_empty() {
            tracing::error!("{}", output.stderr.trim_end());
        }
    }

    Ok(output)
}
