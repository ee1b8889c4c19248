//! Wire mirror of the remote schedule object, plus the expand/flatten
//! mapping to the local entry list.
//!
//! Optional fields are omitted from the wire when unset; the service
//! represents "cleared" as absent, never as an empty string.

use serde::{Deserialize, Serialize};

use crate::model::{DayOfWeek, ScheduleEntry};

/// Top-level remote object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ScheduleProperties>,
    /// Server-assigned audit block; must not be echoed back on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<serde_json::Value>,
}

/// Properties bag of the remote object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_list: Option<Vec<ScheduleWindow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_execution_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_action: Option<String>,
}

/// One start/stop window as the service spells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWindow {
    pub start_day: DayOfWeek,
    pub start_time: String,
    pub stop_day: DayOfWeek,
    pub stop_time: String,
}

/// Local entries to wire windows. Field-for-field, order-preserving; an
/// empty input yields an empty (not absent) output.
pub fn expand_entries(entries: &[ScheduleEntry]) -> Vec<ScheduleWindow> {
    entries
        .iter()
        .map(|entry| ScheduleWindow {
            start_day: entry.start_day,
            start_time: entry.start_time.clone(),
            stop_day: entry.stop_day,
            stop_time: entry.stop_time.clone(),
        })
        .collect()
}

/// Wire windows back to local entries. An absent list flattens to an empty
/// one; the absent/empty asymmetry at this boundary is deliberate.
pub fn flatten_windows(windows: Option<&Vec<ScheduleWindow>>) -> Vec<ScheduleEntry> {
    windows
        .map(|list| {
            list.iter()
                .map(|window| ScheduleEntry {
                    start_day: window.start_day,
                    start_time: window.start_time.clone(),
                    stop_day: window.stop_day,
                    stop_time: window.stop_time.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}
