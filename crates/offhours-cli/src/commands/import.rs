use offhours_core::ScheduleId;

use super::CliError;
use crate::state::{self, TrackedState};

pub fn run(raw: &str) -> Result<(), CliError> {
    let id: ScheduleId = raw.parse()?;
    let adapter = super::adapter()?;
    let rt = super::runtime()?;

    match rt.block_on(adapter.read(&id))? {
        None => Err(format!("{id} does not exist remotely; nothing to import").into()),
        Some(observed) => {
            state::save(&TrackedState {
                id: id.to_string(),
                state: observed,
            })?;
            println!("imported {id}");
            Ok(())
        }
    }
}
