//! Composite identifiers for managed instances and their schedule objects.
//!
//! An instance is addressed as
//! `/subscriptions/<uuid>/resourceGroups/<group>/managedInstances/<name>`;
//! the schedule object appends `/startStopSchedules/<name>` where the object
//! name is always the literal `default` (the service allows one schedule per
//! instance).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// The only schedule-object name the service supports.
pub const SCHEDULE_NAME: &str = "default";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid managed instance id {0:?}: expected /subscriptions/<uuid>/resourceGroups/<group>/managedInstances/<name>")]
    InvalidInstanceId(String),

    #[error("invalid schedule id {0:?}: expected <managed-instance-id>/startStopSchedules/<name>")]
    InvalidScheduleId(String),
}

/// Composite key of the managed instance that owns a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl InstanceId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/managedInstances/{}",
            self.subscription_id, self.resource_group, self.name
        )
    }
}

impl FromStr for InstanceId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdentityError::InvalidInstanceId(s.to_string());
        let rest = s.strip_prefix('/').ok_or_else(invalid)?;
        let mut segments = rest.split('/');
        match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (
                Some("subscriptions"),
                Some(subscription),
                Some("resourceGroups"),
                Some(group),
                Some("managedInstances"),
                Some(name),
                None,
            ) if Uuid::parse_str(subscription).is_ok() && !group.is_empty() && !name.is_empty() => {
                Ok(InstanceId::new(subscription, group, name))
            }
            _ => Err(invalid()),
        }
    }
}

/// Composite key of the schedule object itself: the owning instance plus the
/// fixed object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleId {
    pub instance: InstanceId,
    pub schedule_name: String,
}

impl ScheduleId {
    /// The schedule id for an instance, with the fixed `default` name.
    pub fn for_instance(instance: InstanceId) -> Self {
        Self {
            instance,
            schedule_name: SCHEDULE_NAME.to_string(),
        }
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/startStopSchedules/{}", self.instance, self.schedule_name)
    }
}

impl FromStr for ScheduleId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdentityError::InvalidScheduleId(s.to_string());
        let (head, schedule_name) = s.rsplit_once("/startStopSchedules/").ok_or_else(invalid)?;
        if schedule_name.is_empty() || schedule_name.contains('/') {
            return Err(invalid());
        }
        let instance = head.parse::<InstanceId>().map_err(|_| invalid())?;
        Ok(Self {
            instance,
            schedule_name: schedule_name.to_string(),
        })
    }
}

/// Schema-friendly predicate: is `s` a well-formed managed instance id?
pub fn is_instance_id(s: &str) -> bool {
    s.parse::<InstanceId>().is_ok()
}

/// Schema-friendly predicate: is `s` a well-formed schedule id?
pub fn is_schedule_id(s: &str) -> bool {
    s.parse::<ScheduleId>().is_ok()
}
