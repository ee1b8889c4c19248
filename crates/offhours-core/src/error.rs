//! Error types surfaced by the lifecycle operations.

use std::time::Duration;
use thiserror::Error;

use crate::identity::{IdentityError, InstanceId};
use crate::remote::client::ClientError;

/// Failures a lifecycle operation can end in.
///
/// A missing remote object during read is not an error; `read` reports it as
/// `Ok(None)` so the host can stop tracking the resource.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The owning-instance reference could not be parsed.
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentityError),

    /// A schedule already exists for the instance; the existing object has
    /// to be imported instead of re-created.
    #[error("a start/stop schedule already exists for this instance; import {id} to manage it")]
    AlreadyExists { id: String },

    /// A remote call failed; the operation and identifier qualify the message.
    #[error("{op} for {id}: {source}")]
    RemoteCall {
        op: &'static str,
        id: String,
        #[source]
        source: ClientError,
    },

    /// The remote object came back without a properties body.
    #[error("retrieving {id}: response carried no properties")]
    MissingProperties { id: String },

    /// The operation exceeded its deadline; the in-flight call was abandoned.
    #[error("{op} timed out after {secs}s")]
    Timeout { op: &'static str, secs: u64 },
}

impl AdapterError {
    pub(crate) fn remote(op: &'static str, instance: &InstanceId, source: ClientError) -> Self {
        AdapterError::RemoteCall {
            op,
            id: instance.to_string(),
            source,
        }
    }

    pub(crate) fn timeout(op: &'static str, budget: Duration) -> Self {
        AdapterError::Timeout {
            op,
            secs: budget.as_secs(),
        }
    }
}

/// Result alias for lifecycle operations.
pub type Result<T, E = AdapterError> = std::result::Result<T, E>;
