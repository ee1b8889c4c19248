//! Client seam for the remote management API.

use async_trait::async_trait;
use thiserror::Error;

use super::payload::ScheduleObject;
use crate::identity::InstanceId;

/// Errors surfaced by a [`ScheduleClient`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a service answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("decoding response: {0}")]
    Decode(String),
}

/// Management-API operations for one instance's start/stop schedule.
///
/// Every operation is keyed by the owning instance: the schedule object has
/// no independently addressable identifier on the service side. One call per
/// operation; retries and backoff are the caller's policy, not the client's.
#[async_trait]
pub trait ScheduleClient: Send + Sync {
    /// Fetch the schedule attached to `instance`. `Ok(None)` means the
    /// remote object does not exist.
    async fn get(&self, instance: &InstanceId) -> Result<Option<ScheduleObject>, ClientError>;

    /// Destructive upsert of the schedule attached to `instance`; the
    /// service has no separate create call.
    async fn create_or_update(
        &self,
        instance: &InstanceId,
        body: &ScheduleObject,
    ) -> Result<ScheduleObject, ClientError>;

    /// Remove the schedule attached to `instance`.
    async fn delete(&self, instance: &InstanceId) -> Result<(), ClientError>;
}
