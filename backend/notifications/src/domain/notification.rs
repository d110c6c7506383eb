use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i32,
    pub type_message: i32,
    pub message: String,
    pub task_title: Option<String>,
    pub date: DateTime<Utc>,
}

/// Values supplied by a client when creating a notification. `id` and `date`
/// are assigned by the database.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewNotification {
    #[validate(custom(function = "validate_type_message"))]
    pub type_message: i32,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    pub task_title: Option<String>,
}

impl NewNotification {
    pub fn new(type_message: i32, message: String, task_title: Option<String>) -> Self {
        Self {
            type_message,
            message,
            task_title,
        }
    }
}

fn validate_type_message(type_message: i32) -> Result<(), ValidationError> {
    if type_message == 0 {
        return Err(ValidationError::new("type_message")
            .with_message("type_message must not be zero".into()));
    }
    Ok(())
}

/// Sparse update of a notification. `None` leaves the stored column as is,
/// `Some` overwrites it, zero and empty values included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationPatch {
    pub type_message: Option<i32>,
    pub message: Option<String>,
    pub task_title: Option<String>,
}

impl NotificationPatch {
    pub fn is_empty(&self) -> bool {
        self.type_message.is_none() && self.message.is_none() && self.task_title.is_none()
    }
}
