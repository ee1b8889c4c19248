//! Tracked state for the managed schedule.
//!
//! One JSON file in the config dir remembers the composite id and the last
//! state read back from the service. When a read reports the remote object
//! gone, the file is dropped and the resource stops being tracked.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use offhours_core::ScheduleState;

const STATE_FILE: &str = "state.json";

type CliError = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedState {
    /// Composite schedule id, as a string.
    pub id: String,
    /// Last state observed remotely.
    pub state: ScheduleState,
}

fn path() -> Result<PathBuf, CliError> {
    Ok(offhours_core::settings::config_dir()?.join(STATE_FILE))
}

pub fn load() -> Result<Option<TrackedState>, CliError> {
    let path = path()?;
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

pub fn save(tracked: &TrackedState) -> Result<(), CliError> {
    let raw = serde_json::to_string_pretty(tracked)?;
    std::fs::write(path()?, raw)?;
    Ok(())
}

pub fn clear() -> Result<(), CliError> {
    match std::fs::remove_file(path()?) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
