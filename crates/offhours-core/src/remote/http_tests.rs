use mockito::Matcher;
use url::Url;

use super::client::{ClientError, ScheduleClient};
use super::http::HttpScheduleClient;
use super::payload::{ScheduleObject, ScheduleProperties};
use crate::identity::InstanceId;

const SUB: &str = "e4d1ff1d-54a6-4f6c-a0f0-7d1e1a8cf9b1";
const API_VERSION: &str = "2024-06-01";
const TOKEN: &str = "test-token";

fn instance() -> InstanceId {
    InstanceId::new(SUB, "rg-data", "sqlmi-prod")
}

fn schedule_path() -> String {
    format!("/subscriptions/{SUB}/resourceGroups/rg-data/managedInstances/sqlmi-prod/startStopSchedules/default")
}

fn client_for(server: &mockito::ServerGuard) -> HttpScheduleClient {
    let endpoint = Url::parse(&server.url()).unwrap();
    HttpScheduleClient::new(endpoint, API_VERSION, TOKEN)
}

fn remote_body() -> String {
    serde_json::json!({
        "name": "default",
        "properties": {
            "description": "weeknights",
            "scheduleList": [
                {"startDay": "Monday", "startTime": "08:00", "stopDay": "Friday", "stopTime": "18:00"}
            ],
            "timeZoneId": "UTC"
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_get_decodes_object_and_sends_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", schedule_path().as_str())
        .match_query(Matcher::UrlEncoded("api-version".into(), API_VERSION.into()))
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(remote_body())
        .create_async()
        .await;

    let object = client_for(&server).get(&instance()).await.unwrap().unwrap();
    assert_eq!(object.name.as_deref(), Some("default"));
    assert_eq!(
        object.properties.unwrap().description.as_deref(),
        Some("weeknights")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_maps_not_found_to_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", schedule_path().as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    assert_eq!(client_for(&server).get(&instance()).await.unwrap(), None);
}

#[tokio::test]
async fn test_get_surfaces_error_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", schedule_path().as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal failure")
        .create_async()
        .await;

    let err = client_for(&server).get(&instance()).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal failure");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_or_update_puts_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", schedule_path().as_str())
        .match_query(Matcher::UrlEncoded("api-version".into(), API_VERSION.into()))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "properties": {"timeZoneId": "UTC"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(remote_body())
        .create_async()
        .await;

    let body = ScheduleObject {
        properties: Some(ScheduleProperties {
            time_zone_id: Some("UTC".to_string()),
            schedule_list: Some(Vec::new()),
            ..ScheduleProperties::default()
        }),
        ..ScheduleObject::default()
    };
    let returned = client_for(&server)
        .create_or_update(&instance(), &body)
        .await
        .unwrap();
    assert_eq!(returned.name.as_deref(), Some("default"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_or_update_surfaces_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PUT", schedule_path().as_str())
        .match_query(Matcher::Any)
        .with_status(409)
        .with_body("conflict")
        .create_async()
        .await;

    let err = client_for(&server)
        .create_or_update(&instance(), &ScheduleObject::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }));
}

#[tokio::test]
async fn test_delete_succeeds_on_success_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", schedule_path().as_str())
        .match_query(Matcher::UrlEncoded("api-version".into(), API_VERSION.into()))
        .with_status(200)
        .create_async()
        .await;

    client_for(&server).delete(&instance()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_surfaces_api_error_unmasked() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", schedule_path().as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("no schedule")
        .create_async()
        .await;

    let err = client_for(&server).delete(&instance()).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}
