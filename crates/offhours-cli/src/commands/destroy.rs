use offhours_core::ScheduleId;

use super::CliError;
use crate::state;

pub fn run() -> Result<(), CliError> {
    let Some(tracked) = state::load()? else {
        return Err("no schedule is tracked; nothing to destroy".into());
    };
    let id: ScheduleId = tracked.id.parse()?;
    let adapter = super::adapter()?;
    let rt = super::runtime()?;

    rt.block_on(adapter.delete(&id))?;
    state::clear()?;
    println!("deleted {id}");
    Ok(())
}
