use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::notification::{NewNotification, Notification, NotificationPatch};
use crate::usecase::error::UsecaseError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: i32,
    pub type_message: i32,
    pub message: String,
    pub task_title: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
}

/// Missing `type_message` or `message` deserialize to their zero values and
/// are then rejected by validation.
#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    #[serde(default)]
    pub type_message: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub task_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotificationRequest {
    pub type_message: Option<i32>,
    pub message: Option<String>,
    pub task_title: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteNotificationResponse {
    pub success: bool,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            type_message: n.type_message,
            message: n.message,
            task_title: n.task_title,
            date: n.date,
        }
    }
}

impl From<CreateNotificationRequest> for NewNotification {
    fn from(r: CreateNotificationRequest) -> Self {
        NewNotification::new(r.type_message, r.message, r.task_title)
    }
}

impl From<UpdateNotificationRequest> for NotificationPatch {
    fn from(r: UpdateNotificationRequest) -> Self {
        NotificationPatch {
            type_message: r.type_message,
            message: r.message,
            task_title: r.task_title,
        }
    }
}

fn record_request(operation: &'static str) {
    metrics::counter!("notifications_requests_total", "operation" => operation).increment(1);
}

fn record_error(operation: &'static str, err: &UsecaseError) {
    metrics::counter!(
        "notifications_errors_total",
        "operation" => operation,
        "status" => err.status().as_str().to_string()
    )
    .increment(1);
}

#[tracing::instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    record_request("list");
    tracing::debug!("handling list notifications request");

    let notifications = state
        .notifications_usecase
        .list_notifications()
        .await
        .inspect_err(|e| record_error("list", e))?;
    let response: Vec<NotificationResponse> = notifications.into_iter().map(Into::into).collect();

    tracing::debug!(count = response.len(), "notifications listed successfully");
    Ok((StatusCode::OK, Json(NotificationListResponse { notifications: response })))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn get_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, UsecaseError> {
    record_request("get");
    tracing::debug!("handling get notification request");

    let notification = state
        .notifications_usecase
        .get_notification(id)
        .await
        .inspect_err(|e| record_error("get", e))?;

    Ok((StatusCode::OK, Json(NotificationResponse::from(notification))))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    record_request("create");
    tracing::debug!(type_message = payload.type_message, "handling create notification request");

    let notification = state
        .notifications_usecase
        .create_notification(payload.into())
        .await
        .inspect_err(|e| record_error("create", e))?;

    tracing::debug!(notification_id = notification.id, "notification created successfully");
    Ok((StatusCode::CREATED, Json(NotificationResponse::from(notification))))
}

#[tracing::instrument(skip(state, payload), fields(notification_id = %id))]
pub async fn update_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNotificationRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    record_request("update");
    tracing::debug!(?payload, "handling update notification request");

    let notification = state
        .notifications_usecase
        .update_notification(id, payload.into())
        .await
        .inspect_err(|e| record_error("update", e))?;

    tracing::debug!("notification updated successfully");
    Ok((StatusCode::OK, Json(NotificationResponse::from(notification))))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, UsecaseError> {
    record_request("delete");
    tracing::debug!("handling delete notification request");

    state
        .notifications_usecase
        .delete_notification(id)
        .await
        .inspect_err(|e| record_error("delete", e))?;

    Ok((StatusCode::OK, Json(DeleteNotificationResponse { success: true })))
}

#[cfg(test)]
mod tests {
    use metrics_exporter_prometheus::PrometheusBuilder;

    use super::*;

    fn counter_line<'a>(rendered: &'a str, name: &str) -> Option<&'a str> {
        rendered
            .lines()
            .find(|line| line.starts_with(&format!("{name}{{")))
    }

    #[test]
    fn test_request_counter_recorded_per_operation() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_request("delete");
            record_request("delete");
        });

        let rendered = handle.render();
        let line = counter_line(&rendered, "notifications_requests_total").unwrap();
        assert!(line.contains(r#"operation="delete""#));
        assert!(line.ends_with(" 2"));
    }

    #[test]
    fn test_error_counter_carries_status() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_error("get", &UsecaseError::NotFound("Notification".to_string()));
        });

        let rendered = handle.render();
        let line = counter_line(&rendered, "notifications_errors_total").unwrap();
        assert!(line.contains(r#"operation="get""#));
        assert!(line.contains(r#"status="404""#));
        assert!(line.ends_with(" 1"));
    }

    #[test]
    fn test_delete_response_body() {
        let json = serde_json::to_value(DeleteNotificationResponse { success: true }).unwrap();

        assert_eq!(json, serde_json::json!({"success": true}));
    }

    #[test]
    fn test_update_request_absent_fields_stay_absent() {
        let request: UpdateNotificationRequest =
            serde_json::from_str(r#"{"type_message": 5}"#).unwrap();
        let patch = NotificationPatch::from(request);

        assert_eq!(patch.type_message, Some(5));
        assert!(patch.message.is_none());
        assert!(patch.task_title.is_none());
    }

    #[test]
    fn test_update_request_zero_values_are_present() {
        let request: UpdateNotificationRequest =
            serde_json::from_str(r#"{"type_message": 0, "message": "", "task_title": ""}"#).unwrap();
        let patch = NotificationPatch::from(request);

        assert_eq!(patch.type_message, Some(0));
        assert_eq!(patch.message, Some(String::new()));
        assert_eq!(patch.task_title, Some(String::new()));
    }

    #[test]
    fn test_create_request_missing_fields_default_to_zero() {
        let request: CreateNotificationRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        let new = NewNotification::from(request);

        assert_eq!(new.type_message, 0);
        assert_eq!(new.message, "hi");
        assert!(new.task_title.is_none());
    }

    #[test]
    fn test_response_serializes_all_fields() {
        let date = Utc::now();
        let response = NotificationResponse::from(Notification {
            id: 1,
            type_message: 2,
            message: "hi".to_string(),
            task_title: None,
            date,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["type_message"], 2);
        assert_eq!(json["message"], "hi");
        assert!(json["task_title"].is_null());
        assert_eq!(json["date"], serde_json::to_value(date).unwrap());
    }
}
