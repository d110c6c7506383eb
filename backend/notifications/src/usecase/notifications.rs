use validator::Validate;

use crate::domain::notification::{NewNotification, Notification, NotificationPatch};
use crate::usecase::contracts::NotificationRepository;
use crate::usecase::error::UsecaseError;

pub struct NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    notification_repository: N,
}

impl<N> NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    pub fn new(notification_repository: N) -> Self {
        Self { notification_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, UsecaseError> {
        tracing::debug!("listing notifications");

        let notifications = self.notification_repository.find_all().await?;

        tracing::debug!(count = notifications.len(), "retrieved notifications");
        Ok(notifications)
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn get_notification(&self, id: i32) -> Result<Notification, UsecaseError> {
        tracing::debug!("getting notification");

        let notification = self
            .notification_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("Notification".to_string()))?;

        Ok(notification)
    }

    #[tracing::instrument(skip(self, new), fields(type_message = new.type_message))]
    pub async fn create_notification(&self, new: NewNotification) -> Result<Notification, UsecaseError> {
        tracing::debug!("creating notification");

        if let Err(validation_errors) = new.validate() {
            tracing::warn!(?validation_errors, "validation failed");
            return Err(validation_errors.into());
        }

        let notification = self.notification_repository.create(&new).await?;

        tracing::info!(notification_id = notification.id, "notification created");
        Ok(notification)
    }

    /// Applies a sparse update and returns the row as stored afterwards.
    #[tracing::instrument(skip(self, patch), fields(notification_id = %id))]
    pub async fn update_notification(
        &self,
        id: i32,
        patch: NotificationPatch,
    ) -> Result<Notification, UsecaseError> {
        tracing::debug!(?patch, "updating notification");

        if patch.is_empty() {
            tracing::warn!("update without any field to set");
            return Err(UsecaseError::Validation(
                "at least one of type_message, message, task_title must be provided".to_string(),
            ));
        }

        let notification = self
            .notification_repository
            .update(id, &patch)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("Notification".to_string()))?;

        tracing::info!(notification_id = %id, "notification updated");
        Ok(notification)
    }

    /// Deleting an id that does not exist is not an error.
    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn delete_notification(&self, id: i32) -> Result<(), UsecaseError> {
        tracing::debug!("deleting notification");

        let deleted = self.notification_repository.delete(id).await?;

        tracing::info!(notification_id = %id, deleted, "notification delete executed");
        Ok(())
    }
}
