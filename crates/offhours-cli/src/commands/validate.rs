use std::path::Path;

use offhours_core::{schema, ScheduleState};

use super::CliError;

pub fn run(file: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("reading {}: {e}", file.display()))?;
    let declaration: ScheduleState = toml::from_str(&raw)?;

    match schema::validate(&declaration) {
        Ok(()) => {
            println!(
                "{} is valid ({} schedule entr{})",
                file.display(),
                declaration.schedule_list.len(),
                if declaration.schedule_list.len() == 1 { "y" } else { "ies" }
            );
            Ok(())
        }
        Err(violations) => {
            for violation in &violations {
                eprintln!("{violation}");
            }
            Err(format!("{} schema violation(s)", violations.len()).into())
        }
    }
}
