use crate::{
    domain::notification::{NewNotification, Notification, NotificationPatch},
    repository::errors::RepositoryError,
};

#[cfg_attr(test, mockall::automock)]
pub trait NotificationRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Notification>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Notification>, RepositoryError>;
    async fn create(&self, new: &NewNotification) -> Result<Notification, RepositoryError>;
    /// Returns the row as stored after the update, or `None` when no row has this id.
    async fn update(&self, id: i32, patch: &NotificationPatch) -> Result<Option<Notification>, RepositoryError>;
    /// Returns the number of deleted rows.
    async fn delete(&self, id: i32) -> Result<u64, RepositoryError>;
}
