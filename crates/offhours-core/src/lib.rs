//! # offhours core library
//!
//! Declarative lifecycle management for the start/stop schedule attached to
//! a managed database instance. A schedule is declared locally as a flat
//! record (owner instance, description, ordered start/stop entries, timezone)
//! and reconciled against the remote management API through four lifecycle
//! operations: create, read, update and delete.
//!
//! ## Architecture
//!
//! - **State Model**: [`ScheduleState`] mirrors the declared fields plus the
//!   server-computed outputs (object name, next execution time, next action)
//! - **Schema**: a declarative field table with per-field validation
//!   predicates, applied before any remote call
//! - **Remote client**: [`ScheduleClient`] is the seam to the management
//!   API, with an HTTP implementation and an in-memory fake for tests
//! - **Adapter**: [`ScheduleAdapter`] runs each lifecycle operation under a
//!   fixed deadline and translates payloads both ways
//!
//! The remote service keys everything by the owning instance and supports at
//! most one schedule object per instance; the composite [`ScheduleId`]
//! therefore always ends in the fixed object name `default`.

pub mod adapter;
pub mod auth;
pub mod error;
pub mod identity;
pub mod model;
pub mod remote;
pub mod schema;
pub mod settings;

pub use adapter::{OperationTimeouts, ScheduleAdapter};
pub use error::AdapterError;
pub use identity::{InstanceId, ScheduleId};
pub use model::{DayOfWeek, ScheduleEntry, ScheduleState};
pub use remote::{ClientError, FakeScheduleClient, HttpScheduleClient, ScheduleClient};
pub use settings::Settings;
