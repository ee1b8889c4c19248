//! Lifecycle operations over the remote schedule object.
//!
//! Each operation runs a short sequence of remote calls under a fixed
//! deadline and translates between the flat [`ScheduleState`] and the nested
//! wire payload. Nothing is retried here; a failed call surfaces as
//! [`AdapterError::RemoteCall`] with the operation and identifier attached.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::AdapterError;
use crate::identity::{InstanceId, ScheduleId};
use crate::model::ScheduleState;
use crate::remote::payload::{expand_entries, flatten_windows, ScheduleObject, ScheduleProperties};
use crate::remote::ScheduleClient;


/// Per-operation deadlines. Mutating operations default to 30 minutes,
/// reads to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTimeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            read: Duration::from_secs(5 * 60),
            update: Duration::from_secs(30 * 60),
            delete: Duration::from_secs(30 * 60),
        }
    }
}

/// Binds the declarative state model to the remote API through one client.
///
/// The host is expected not to run two operations against the same
/// identifier concurrently; the adapter itself keeps no state between calls.
pub struct ScheduleAdapter<C> {
    client: C,
    timeouts: OperationTimeouts,
}

impl<C: ScheduleClient> ScheduleAdapter<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            timeouts: OperationTimeouts::default(),
        }
    }

    pub fn with_timeouts(client: C, timeouts: OperationTimeouts) -> Self {
        Self { client, timeouts }
    }

    /// Create the schedule for the instance declared in `desired` and return
    /// the derived composite id.
    ///
    /// The upsert the service exposes is destructive, so an existing object
    /// is detected first and refused with [`AdapterError::AlreadyExists`].
    /// The check and the write are separate calls: two concurrent creates
    /// can both pass the check, and the second one wins.
    pub async fn create(&self, desired: &ScheduleState) -> Result<ScheduleId, AdapterError> {
        let instance: InstanceId = desired.managed_instance_id.parse()?;
        timeout(self.timeouts.create, self.create_inner(instance, desired))
            .await
            .map_err(|_| AdapterError::timeout("create", self.timeouts.create))?
    }

    async fn create_inner(
        &self,
        instance: InstanceId,
        desired: &ScheduleState,
    ) -> Result<ScheduleId, AdapterError> {
        let existing = self
            .client
            .get(&instance)
            .await
            .map_err(|err| AdapterError::remote("checking for existing schedule", &instance, err))?;
        if existing.is_some() {
            return Err(AdapterError::AlreadyExists {
                id: ScheduleId::for_instance(instance).to_string(),
            });
        }

        let mut properties = ScheduleProperties {
            schedule_list: Some(expand_entries(&desired.schedule_list)),
            ..ScheduleProperties::default()
        };
        if !desired.description.is_empty() {
            properties.description = Some(desired.description.clone());
        }
        if !desired.timezone_id.is_empty() {
            properties.time_zone_id = Some(desired.timezone_id.clone());
        }
        let body = ScheduleObject {
            properties: Some(properties),
            ..ScheduleObject::default()
        };

        self.client
            .create_or_update(&instance, &body)
            .await
            .map_err(|err| AdapterError::remote("creating schedule", &instance, err))?;

        let id = ScheduleId::for_instance(instance);
        info!(%id, "created start/stop schedule");
        Ok(id)
    }

    /// Fetch remote state. `Ok(None)` means the object is gone and the host
    /// should drop it from tracked state.
    pub async fn read(&self, id: &ScheduleId) -> Result<Option<ScheduleState>, AdapterError> {
        timeout(self.timeouts.read, self.read_inner(id))
            .await
            .map_err(|_| AdapterError::timeout("read", self.timeouts.read))?
    }

    async fn read_inner(&self, id: &ScheduleId) -> Result<Option<ScheduleState>, AdapterError> {
        let instance = &id.instance;
        let remote = self
            .client
            .get(instance)
            .await
            .map_err(|err| AdapterError::remote("retrieving schedule", instance, err))?;
        let Some(remote) = remote else {
            debug!(%id, "remote schedule not found, treating as gone");
            return Ok(None);
        };

        let mut state = ScheduleState {
            managed_instance_id: instance.to_string(),
            description: String::new(),
            schedule_list: Vec::new(),
            timezone_id: String::new(),
            name: remote.name.unwrap_or_default(),
            next_execution_time: String::new(),
            next_run_action: String::new(),
        };
        if let Some(properties) = remote.properties {
            state.description = properties.description.unwrap_or_default();
            state.schedule_list = flatten_windows(properties.schedule_list.as_ref());
            state.timezone_id = properties.time_zone_id.unwrap_or_default();
            state.next_execution_time = properties.next_execution_time.unwrap_or_default();
            state.next_run_action = properties.next_run_action.unwrap_or_default();
        }
        Ok(Some(state))
    }

    /// Patch the fetched remote object with whatever changed between `prior`
    /// and `desired`, then re-issue the upsert.
    ///
    /// An empty declared value clears the remote field to absent; the
    /// service treats absent, not `""`, as "unset". Server-assigned metadata
    /// is stripped before the payload is echoed back.
    pub async fn update(
        &self,
        id: &ScheduleId,
        prior: &ScheduleState,
        desired: &ScheduleState,
    ) -> Result<(), AdapterError> {
        timeout(self.timeouts.update, self.update_inner(id, prior, desired))
            .await
            .map_err(|_| AdapterError::timeout("update", self.timeouts.update))?
    }

    async fn update_inner(
        &self,
        id: &ScheduleId,
        prior: &ScheduleState,
        desired: &ScheduleState,
    ) -> Result<(), AdapterError> {
        let instance = &id.instance;
        let mut remote = self
            .client
            .get(instance)
            .await
            .map_err(|err| AdapterError::remote("retrieving schedule", instance, err))?
            .ok_or_else(|| AdapterError::MissingProperties { id: id.to_string() })?;
        let properties = remote
            .properties
            .as_mut()
            .ok_or_else(|| AdapterError::MissingProperties { id: id.to_string() })?;

        if desired.description != prior.description {
            properties.description = if desired.description.is_empty() {
                None
            } else {
                Some(desired.description.clone())
            };
        }
        if desired.schedule_list != prior.schedule_list {
            properties.schedule_list = Some(expand_entries(&desired.schedule_list));
        }
        if desired.timezone_id != prior.timezone_id {
            properties.time_zone_id = if desired.timezone_id.is_empty() {
                None
            } else {
                Some(desired.timezone_id.clone())
            };
        }

        remote.system_data = None;

        self.client
            .create_or_update(instance, &remote)
            .await
            .map_err(|err| AdapterError::remote("updating schedule", instance, err))?;
        info!(%id, "updated start/stop schedule");
        Ok(())
    }

    /// Delete the schedule. The service models deletion at the owning
    /// instance, so only the instance part of the composite id is used; a
    /// delete against an already-absent object surfaces whatever the service
    /// answers, unmasked.
    pub async fn delete(&self, id: &ScheduleId) -> Result<(), AdapterError> {
        timeout(self.timeouts.delete, self.delete_inner(id))
            .await
            .map_err(|_| AdapterError::timeout("delete", self.timeouts.delete))?
    }

    async fn delete_inner(&self, id: &ScheduleId) -> Result<(), AdapterError> {
        let instance = &id.instance;
        self.client
            .delete(instance)
            .await
            .map_err(|err| AdapterError::remote("deleting schedule", instance, err))?;
        info!(%id, "deleted start/stop schedule");
        Ok(())
    }
}
