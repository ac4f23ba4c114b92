use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use inline_edit::config::{FormConfig, InlineEditConfig};
use inline_edit::model::{FieldId, FieldValue};
use inline_edit::runtime::{parse_script, Notice, Runtime};
use inline_edit::view::render_text;

mod cli;

use cli::{CliArgs, RunConfig};

/// Error returned by the simulated backend when `--fail-saves` is set
const SIMULATED_FAILURE: &str = "Network error";

fn main() -> Result<()> {
    inline_edit::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    run(config)
}

fn run(config: RunConfig) -> Result<()> {
    let defaults = InlineEditConfig::load();
    let form = FormConfig::load(&config.form)
        .and_then(|form| form.build(&defaults))
        .map_err(anyhow::Error::msg)?;

    let fail_saves = config.fail_saves;
    let mut runtime = Runtime::new(form, move |field: &FieldId, value: &FieldValue| -> Result<()> {
        tracing::info!(%field, %value, "backend write");
        if fail_saves {
            anyhow::bail!(SIMULATED_FAILURE);
        }
        Ok(())
    })
    .with_notifier(|notice: &Notice| match notice {
        Notice::Saved { .. } => eprintln!("✓ {}", notice),
        Notice::Failed { .. } => eprintln!("✗ {}", notice),
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render_text(&runtime.model().view()))?;

    if let Some(path) = &config.script {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let steps = parse_script(&source).map_err(anyhow::Error::msg)?;

        for (index, step) in steps.iter().enumerate() {
            step.apply(&mut runtime, config.timeout)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("step {} failed", index + 1))?;
            writeln!(out, "\n-- step {}: {:?}", index + 1, step)?;
            writeln!(out, "{}", render_text(&runtime.model().view()))?;
        }
    }

    runtime
        .wait_idle(config.timeout)
        .map_err(anyhow::Error::msg)?;

    if config.json {
        let json = serde_json::to_string_pretty(&runtime.model().to_json())?;
        writeln!(out, "{}", json)?;
    }
    Ok(())
}
