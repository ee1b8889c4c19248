//! Remote management API surface.
//!
//! The JSON payload shape is owned by the remote service and mirrored here
//! field-for-field; [`ScheduleClient`] is the seam the lifecycle operations
//! call through, with a reqwest implementation and an in-memory fake.

pub mod client;
pub mod fake;
pub mod http;
pub mod payload;

#[cfg(test)]
mod http_tests;

pub use client::{ClientError, ScheduleClient};
pub use fake::{FakeScheduleClient, RecordedCall};
pub use http::HttpScheduleClient;
pub use payload::{expand_entries, flatten_windows, ScheduleObject, ScheduleProperties, ScheduleWindow};
