use chrono::Utc;

use offhours_core::{ScheduleId, ScheduleState};

use super::CliError;
use crate::state::{self, TrackedState};

pub fn run(json: bool) -> Result<(), CliError> {
    let Some(tracked) = state::load()? else {
        return Err("no schedule is tracked; apply or import one first".into());
    };
    let id: ScheduleId = tracked.id.parse()?;
    let adapter = super::adapter()?;
    let rt = super::runtime()?;

    match rt.block_on(adapter.read(&id))? {
        None => {
            state::clear()?;
            println!("{id} no longer exists remotely; dropped from tracked state");
        }
        Some(observed) => {
            state::save(&TrackedState {
                id: id.to_string(),
                state: observed.clone(),
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&observed)?);
            } else {
                print_summary(&id, &observed);
            }
        }
    }
    Ok(())
}

fn print_summary(id: &ScheduleId, state: &ScheduleState) {
    println!("schedule:    {id}");
    println!("instance:    {}", state.managed_instance_id);
    if !state.description.is_empty() {
        println!("description: {}", state.description);
    }
    if !state.timezone_id.is_empty() {
        println!("timezone:    {}", state.timezone_id);
    }
    for entry in &state.schedule_list {
        println!(
            "  start {} {}  ->  stop {} {}",
            entry.start_day, entry.start_time, entry.stop_day, entry.stop_time
        );
    }
    if !state.next_run_action.is_empty() || !state.next_execution_time.is_empty() {
        match state.next_execution_at() {
            Some(at) => {
                let remaining = at - Utc::now();
                if remaining.num_seconds() > 0 {
                    println!(
                        "next:        {} at {} (in {}h{:02}m)",
                        state.next_run_action,
                        state.next_execution_time,
                        remaining.num_hours(),
                        remaining.num_minutes() % 60
                    );
                } else {
                    println!("next:        {} at {}", state.next_run_action, state.next_execution_time);
                }
            }
            None => {
                println!("next:        {} at {}", state.next_run_action, state.next_execution_time);
            }
        }
    }
}
