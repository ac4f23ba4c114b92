//! Command-line argument parsing for the form runner
//!
//! Supports:
//! - Loading a YAML form definition
//! - Replaying a scripted interaction session against it
//! - Simulated save failures
//! - JSON export of the committed values

use clap::Parser;
use std::path::PathBuf;

/// Replay inline-edit interactions against a form
#[derive(Parser, Debug)]
#[command(
    name = "inline-edit",
    version,
    about = "Replay inline-edit interactions against a form"
)]
pub struct CliArgs {
    /// YAML form definition
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Interaction script, one step per line
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Reject every save with a simulated network error
    #[arg(long)]
    pub fail_saves: bool,

    /// Print the committed values as JSON when done
    #[arg(long)]
    pub json: bool,

    /// Seconds to wait for a save before giving up
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub form: PathBuf,
    pub script: Option<PathBuf>,
    pub fail_saves: bool,
    pub json: bool,
    pub timeout: std::time::Duration,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        if self.timeout == 0 {
            return Err("--timeout must be at least 1 second".to_string());
        }
        if self.form.is_dir() {
            return Err(format!("{} is a directory", self.form.display()));
        }

        Ok(RunConfig {
            form: self.form,
            script: self.script,
            fail_saves: self.fail_saves,
            json: self.json,
            timeout: std::time::Duration::from_secs(self.timeout),
        })
    }
}
