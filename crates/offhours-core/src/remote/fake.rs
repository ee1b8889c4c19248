//! In-memory [`ScheduleClient`] for tests and local experimentation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::client::{ClientError, ScheduleClient};
use super::payload::ScheduleObject;
use crate::identity::{InstanceId, SCHEDULE_NAME};

/// One recorded client call, keyed by the instance it addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Get(String),
    CreateOrUpdate(String),
    Delete(String),
}

#[derive(Default)]
struct FakeState {
    stored: Option<ScheduleObject>,
    last_upsert: Option<ScheduleObject>,
    calls: Vec<RecordedCall>,
    fail_next: Option<ClientError>,
    delay: Option<Duration>,
}

/// Keeps at most one schedule object, like the service does, and records
/// every call it receives.
#[derive(Clone, Default)]
pub struct FakeScheduleClient {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeScheduleClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an object already present remotely.
    pub fn with_stored(object: ScheduleObject) -> Self {
        let fake = Self::new();
        fake.lock().stored = Some(object);
        fake
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The object currently held, as the service would return it.
    pub fn stored(&self) -> Option<ScheduleObject> {
        self.lock().stored.clone()
    }

    /// The body most recently passed to `create_or_update`, exactly as sent.
    pub fn last_upsert(&self) -> Option<ScheduleObject> {
        self.lock().last_upsert.clone()
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ClientError) {
        self.lock().fail_next = Some(error);
    }

    /// Delay every call; used to exercise operation deadlines.
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    async fn before_call(&self, call: RecordedCall) -> Result<(), ClientError> {
        let (delay, failure) = {
            let mut state = self.lock();
            state.calls.push(call);
            (state.delay, state.fail_next.take())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ScheduleClient for FakeScheduleClient {
    async fn get(&self, instance: &InstanceId) -> Result<Option<ScheduleObject>, ClientError> {
        self.before_call(RecordedCall::Get(instance.to_string())).await?;
        Ok(self.lock().stored.clone())
    }

    async fn create_or_update(
        &self,
        instance: &InstanceId,
        body: &ScheduleObject,
    ) -> Result<ScheduleObject, ClientError> {
        self.before_call(RecordedCall::CreateOrUpdate(instance.to_string()))
            .await?;
        let mut state = self.lock();
        state.last_upsert = Some(body.clone());

        // The service assigns identity on upsert.
        let mut stored = body.clone();
        if stored.name.is_none() {
            stored.name = Some(SCHEDULE_NAME.to_string());
        }
        if stored.id.is_none() {
            stored.id = Some(format!("{instance}/startStopSchedules/{SCHEDULE_NAME}"));
        }
        state.stored = Some(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, instance: &InstanceId) -> Result<(), ClientError> {
        self.before_call(RecordedCall::Delete(instance.to_string())).await?;
        let mut state = self.lock();
        if state.stored.take().is_none() {
            return Err(ClientError::Api {
                status: 404,
                message: "no start/stop schedule exists for this instance".to_string(),
            });
        }
        Ok(())
    }
}
