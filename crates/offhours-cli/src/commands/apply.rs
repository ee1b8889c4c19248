use std::path::Path;

use offhours_core::{schema, ScheduleId};

use super::CliError;
use crate::state::{self, TrackedState};

pub fn run(file: &Path) -> Result<(), CliError> {
    let desired = super::load_declaration(file)?;
    let adapter = super::adapter()?;
    let rt = super::runtime()?;

    let id = match state::load()? {
        None => {
            let id = rt.block_on(adapter.create(&desired))?;
            println!("created {id}");
            id
        }
        Some(tracked) => {
            if let Some(field) = schema::force_new_changed(&tracked.state, &desired) {
                return Err(format!(
                    "{field} changed; run `offhours destroy` and apply again to replace the schedule"
                )
                .into());
            }
            let id: ScheduleId = tracked.id.parse()?;
            rt.block_on(adapter.update(&id, &tracked.state, &desired))?;
            println!("updated {id}");
            id
        }
    };

    // Refresh tracked state so computed fields are current.
    match rt.block_on(adapter.read(&id))? {
        Some(observed) => state::save(&TrackedState {
            id: id.to_string(),
            state: observed,
        })?,
        None => state::clear()?,
    }
    Ok(())
}
