//! Declarative schema for the schedule resource.
//!
//! One [`FieldSpec`] per declared or computed field, with the validation
//! predicate the hosting tool applies at decode time. Validation is pure;
//! violations are collected rather than failing on the first one.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::identity;
use crate::model::{DayOfWeek, ScheduleState};

/// How a field participates in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// User-supplied and mandatory.
    Required,
    /// User-supplied, may be omitted.
    Optional,
    /// Server-assigned output; user input is ignored.
    Computed,
}

/// Validation predicate attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Value must be a non-empty string.
    NonEmpty,
    /// Value must be one of the seven day names.
    DayOfWeek,
    /// Value must parse as a managed instance id.
    InstanceId,
    /// List must contain at least this many elements.
    MinItems(usize),
    /// No local validation; the remote service has the last word.
    Accepted,
}

impl Predicate {
    /// Apply a scalar predicate to a string value.
    pub fn holds_for(self, value: &str) -> bool {
        match self {
            Predicate::NonEmpty => !value.is_empty(),
            Predicate::DayOfWeek => DayOfWeek::from_str(value).is_ok(),
            Predicate::InstanceId => identity::is_instance_id(value),
            Predicate::MinItems(_) | Predicate::Accepted => true,
        }
    }
}

/// One field of the resource schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub mode: FieldMode,
    /// Changing this field forces full replacement of the resource.
    pub force_new: bool,
    /// Default applied when the field is omitted from a declaration.
    pub default: Option<&'static str>,
    pub predicate: Predicate,
}

/// The full field table, declared fields first, computed outputs last.
/// Entry-level fields are addressed as `schedule_list.<field>`.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "managed_instance_id",
        mode: FieldMode::Required,
        force_new: true,
        default: None,
        predicate: Predicate::InstanceId,
    },
    FieldSpec {
        name: "description",
        mode: FieldMode::Optional,
        force_new: false,
        default: None,
        predicate: Predicate::Accepted,
    },
    FieldSpec {
        name: "schedule_list",
        mode: FieldMode::Required,
        force_new: false,
        default: None,
        predicate: Predicate::MinItems(1),
    },
    FieldSpec {
        name: "schedule_list.start_day",
        mode: FieldMode::Required,
        force_new: false,
        default: None,
        predicate: Predicate::DayOfWeek,
    },
    FieldSpec {
        name: "schedule_list.start_time",
        mode: FieldMode::Required,
        force_new: false,
        default: None,
        predicate: Predicate::NonEmpty,
    },
    FieldSpec {
        name: "schedule_list.stop_day",
        mode: FieldMode::Required,
        force_new: false,
        default: None,
        predicate: Predicate::DayOfWeek,
    },
    FieldSpec {
        name: "schedule_list.stop_time",
        mode: FieldMode::Required,
        force_new: false,
        default: None,
        predicate: Predicate::NonEmpty,
    },
    FieldSpec {
        name: "timezone_id",
        mode: FieldMode::Optional,
        force_new: false,
        default: Some("UTC"),
        predicate: Predicate::NonEmpty,
    },
    FieldSpec {
        name: "name",
        mode: FieldMode::Computed,
        force_new: false,
        default: None,
        predicate: Predicate::Accepted,
    },
    FieldSpec {
        name: "next_execution_time",
        mode: FieldMode::Computed,
        force_new: false,
        default: None,
        predicate: Predicate::Accepted,
    },
    FieldSpec {
        name: "next_run_action",
        mode: FieldMode::Computed,
        force_new: false,
        default: None,
        predicate: Predicate::Accepted,
    },
];

/// Look up a field by name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// One rejected field value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct SchemaViolation {
    pub field: String,
    pub message: String,
}

impl SchemaViolation {
    fn new(field: impl fmt::Display, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a decoded declaration against the field table. All violations
/// are reported, not just the first.
pub fn validate(state: &ScheduleState) -> Result<(), Vec<SchemaViolation>> {
    let mut violations = Vec::new();

    for spec in FIELDS {
        match spec.name {
            "managed_instance_id" => check_scalar(spec, &state.managed_instance_id, &mut violations),
            "description" => check_scalar(spec, &state.description, &mut violations),
            "timezone_id" => check_scalar(spec, &state.timezone_id, &mut violations),
            "schedule_list" => {
                if let Predicate::MinItems(min) = spec.predicate {
                    if state.schedule_list.len() < min {
                        violations.push(SchemaViolation::new(
                            spec.name,
                            format!("at least {min} entry required"),
                        ));
                    }
                }
            }
            name if name.starts_with("schedule_list.") => {
                for (index, entry) in state.schedule_list.iter().enumerate() {
                    let value = match name {
                        "schedule_list.start_day" => entry.start_day.as_str().to_string(),
                        "schedule_list.start_time" => entry.start_time.clone(),
                        "schedule_list.stop_day" => entry.stop_day.as_str().to_string(),
                        "schedule_list.stop_time" => entry.stop_time.clone(),
                        _ => continue,
                    };
                    if !spec.predicate.holds_for(&value) {
                        violations.push(SchemaViolation::new(
                            format!("schedule_list[{index}].{}", name.trim_start_matches("schedule_list.")),
                            violation_message(spec.predicate),
                        ));
                    }
                }
            }
            _ => {} // computed outputs carry no input validation
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_scalar(spec: &FieldSpec, value: &str, violations: &mut Vec<SchemaViolation>) {
    if value.is_empty() {
        if spec.mode == FieldMode::Required {
            violations.push(SchemaViolation::new(spec.name, "required"));
        }
        // Optional fields may be empty; the default was already applied at
        // decode time when the field was omitted entirely.
        if spec.mode == FieldMode::Optional && spec.predicate == Predicate::NonEmpty {
            violations.push(SchemaViolation::new(
                spec.name,
                "must not be empty when set; omit the field instead",
            ));
        }
        return;
    }
    if !spec.predicate.holds_for(value) {
        violations.push(SchemaViolation::new(spec.name, violation_message(spec.predicate)));
    }
}

fn violation_message(predicate: Predicate) -> String {
    match predicate {
        Predicate::NonEmpty => "must not be empty".to_string(),
        Predicate::DayOfWeek => {
            let days: Vec<&str> = DayOfWeek::ALL.iter().map(|d| d.as_str()).collect();
            format!("must be one of {}", days.join(", "))
        }
        Predicate::InstanceId => {
            "must be a managed instance id (/subscriptions/<uuid>/resourceGroups/<group>/managedInstances/<name>)"
                .to_string()
        }
        Predicate::MinItems(min) => format!("at least {min} entry required"),
        Predicate::Accepted => String::new(),
    }
}

/// Which force-new field changed between two states, if any. A change to a
/// force-new field cannot be applied in place; the resource must be
/// destroyed and re-created.
pub fn force_new_changed(prior: &ScheduleState, desired: &ScheduleState) -> Option<&'static str> {
    FIELDS.iter().filter(|spec| spec.force_new).find_map(|spec| match spec.name {
        "managed_instance_id" if prior.managed_instance_id != desired.managed_instance_id => {
            Some(spec.name)
        }
        _ => None,
    })
}
