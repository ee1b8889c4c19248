//! Declarative state model for a managed-instance start/stop schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of week accepted by the scheduling API. Serialized by full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All accepted values, in week order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .iter()
            .copied()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| format!("unknown day of week: {s}"))
    }
}

/// One (start day/time, stop day/time) pair within the schedule's ordered
/// activation list. Times are free-form strings; chronological consistency
/// between start and stop is the remote service's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub start_day: DayOfWeek,
    pub start_time: String,
    pub stop_day: DayOfWeek,
    pub stop_time: String,
}

/// Flat declarative record for one instance's schedule.
///
/// The last three fields are server-assigned outputs: empty until the first
/// successful read, and never sent to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    /// Owning instance reference. Immutable after creation; changing it
    /// requires destroying and re-creating the schedule.
    pub managed_instance_id: String,
    /// Free-text description. Empty means unset.
    #[serde(default)]
    pub description: String,
    /// Ordered activation list; must contain at least one entry.
    pub schedule_list: Vec<ScheduleEntry>,
    /// IANA timezone the schedule runs in.
    #[serde(default = "default_timezone")]
    pub timezone_id: String,
    /// Server-assigned object name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Next activation timestamp, as reported by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_execution_time: String,
    /// Whether the next activation starts or stops the instance.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_run_action: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl ScheduleState {
    /// Parse the server-reported next execution time, when present and
    /// RFC 3339 shaped. The raw string stays authoritative either way.
    pub fn next_execution_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.next_execution_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_round_trip() {
        for day in DayOfWeek::ALL {
            assert_eq!(day.as_str().parse::<DayOfWeek>().unwrap(), day);
        }
        assert!("monday".parse::<DayOfWeek>().is_err());
        assert!("Someday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_day_of_week_serializes_by_full_name() {
        let json = serde_json::to_string(&DayOfWeek::Wednesday).unwrap();
        assert_eq!(json, "\"Wednesday\"");
    }

    #[test]
    fn test_declaration_defaults_timezone_to_utc() {
        let decl = r#"
            managed_instance_id = "/subscriptions/x/resourceGroups/rg/managedInstances/mi"

            [[schedule_list]]
            start_day = "Monday"
            start_time = "08:00"
            stop_day = "Friday"
            stop_time = "18:00"
        "#;
        let state: ScheduleState = toml::from_str(decl).unwrap();
        assert_eq!(state.timezone_id, "UTC");
        assert_eq!(state.description, "");
        assert_eq!(state.schedule_list.len(), 1);
        assert_eq!(state.schedule_list[0].start_day, DayOfWeek::Monday);
    }

    #[test]
    fn test_declaration_rejects_unknown_day() {
        let decl = r#"
            managed_instance_id = "/subscriptions/x/resourceGroups/rg/managedInstances/mi"

            [[schedule_list]]
            start_day = "Funday"
            start_time = "08:00"
            stop_day = "Friday"
            stop_time = "18:00"
        "#;
        assert!(toml::from_str::<ScheduleState>(decl).is_err());
    }

    #[test]
    fn test_next_execution_at() {
        let mut state = ScheduleState {
            managed_instance_id: String::new(),
            description: String::new(),
            schedule_list: Vec::new(),
            timezone_id: String::new(),
            name: String::new(),
            next_execution_time: "2026-08-10T08:00:00Z".to_string(),
            next_run_action: String::new(),
        };
        let at = state.next_execution_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2026-08-10T08:00:00+00:00");

        state.next_execution_time = String::new();
        assert!(state.next_execution_at().is_none());

        state.next_execution_time = "not a timestamp".to_string();
        assert!(state.next_execution_at().is_none());
    }
}
