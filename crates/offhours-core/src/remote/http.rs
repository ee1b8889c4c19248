//! reqwest-backed [`ScheduleClient`] for the management endpoint.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

use super::client::{ClientError, ScheduleClient};
use super::payload::ScheduleObject;
use crate::identity::{InstanceId, SCHEDULE_NAME};

/// HTTP client: bearer-token auth, JSON bodies, `api-version` query on every
/// call. No retries; a single request per operation.
pub struct HttpScheduleClient {
    endpoint: Url,
    api_version: String,
    token: String,
    http: Client,
}

impl HttpScheduleClient {
    pub fn new(endpoint: Url, api_version: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint,
            api_version: api_version.into(),
            token: token.into(),
            http: Client::new(),
        }
    }

    fn schedule_url(&self, instance: &InstanceId) -> Result<Url, ClientError> {
        let path = format!("{instance}/startStopSchedules/{SCHEDULE_NAME}");
        self.endpoint
            .join(&path)
            .map_err(|err| ClientError::Transport(format!("building request url: {err}")))
    }

    async fn api_error(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        ClientError::Api { status, message }
    }

    async fn decode(response: Response) -> Result<ScheduleObject, ClientError> {
        response
            .json::<ScheduleObject>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[async_trait]
impl ScheduleClient for HttpScheduleClient {
    async fn get(&self, instance: &InstanceId) -> Result<Option<ScheduleObject>, ClientError> {
        let url = self.schedule_url(instance)?;
        debug!(%instance, "GET schedule");
        let response = self
            .http
            .get(url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(Some(Self::decode(response).await?))
    }

    async fn create_or_update(
        &self,
        instance: &InstanceId,
        body: &ScheduleObject,
    ) -> Result<ScheduleObject, ClientError> {
        let url = self.schedule_url(instance)?;
        debug!(%instance, "PUT schedule");
        let response = self
            .http
            .put(url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Self::decode(response).await
    }

    async fn delete(&self, instance: &InstanceId) -> Result<(), ClientError> {
        let url = self.schedule_url(instance)?;
        debug!(%instance, "DELETE schedule");
        let response = self
            .http
            .delete(url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }
}
