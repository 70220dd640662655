use std::process::ExitCode;

use anyhow::Result;
use folio::{AppOptions, replay::ReplayScript};

#[tracing::instrument(skip(options))]
pub fn run(path: &str, options: AppOptions) -> Result<ExitCode> {
    let script = ReplayScript::from_path(path)?;

    tracing::info!(
        elements = script.elements.len(),
        events = script.events.len(),
        "replaying script"
    );

    let snapshot = folio::replay::run(&script, options)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(ExitCode::SUCCESS)
}
