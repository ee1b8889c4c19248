//! CLI subcommands.

pub mod apply;
pub mod auth;
pub mod config;
pub mod destroy;
pub mod import;
pub mod show;
pub mod validate;

use std::path::Path;

use offhours_core::{auth as core_auth, schema, HttpScheduleClient, ScheduleAdapter, ScheduleState, Settings};

pub(crate) type CliError = Box<dyn std::error::Error>;

/// One runtime per command invocation; commands block on it.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Build the adapter from settings and the stored token.
pub(crate) fn adapter() -> Result<ScheduleAdapter<HttpScheduleClient>, CliError> {
    let settings = Settings::load_or_default()?;
    let endpoint = settings.endpoint_url()?;
    let token = core_auth::stored_token()?
        .ok_or("no management token available; run `offhours auth login --token <token>`")?;
    let client = HttpScheduleClient::new(endpoint, settings.api_version.clone(), token);
    Ok(ScheduleAdapter::with_timeouts(
        client,
        settings.timeouts.operation_timeouts(),
    ))
}

/// Decode and validate a declaration file.
pub(crate) fn load_declaration(path: &Path) -> Result<ScheduleState, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {e}", path.display()))?;
    let mut declaration: ScheduleState = toml::from_str(&raw)?;

    // Computed outputs are never user input.
    declaration.name.clear();
    declaration.next_execution_time.clear();
    declaration.next_run_action.clear();

    if let Err(violations) = schema::validate(&declaration) {
        let joined = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(joined.into());
    }
    Ok(declaration)
}
