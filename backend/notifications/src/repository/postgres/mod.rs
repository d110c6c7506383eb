pub mod update;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    domain::notification::{NewNotification, Notification, NotificationPatch},
    repository::errors::RepositoryError,
    usecase::contracts::NotificationRepository,
};

use self::update::{build_update, UpdateArg, UpdateStatement};

pub(crate) const NOTIFICATION_COLUMNS: &str = "id, type_message, message, task_title, date";

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl NotificationRepository for PostgresNotificationRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Notification>, RepositoryError> {
        tracing::debug!("finding all notifications");

        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications ORDER BY id",
            NOTIFICATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(count = notifications.len(), "found notifications");
        Ok(notifications)
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    async fn find_by_id(&self, id: i32) -> Result<Option<Notification>, RepositoryError> {
        tracing::debug!("finding notification by id");

        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications WHERE id = $1",
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(notification)
    }

    #[tracing::instrument(skip(self, new), fields(type_message = new.type_message))]
    async fn create(&self, new: &NewNotification) -> Result<Notification, RepositoryError> {
        tracing::debug!("creating notification");

        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (type_message, message, task_title)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(new.type_message)
        .bind(&new.message)
        .bind(&new.task_title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(notification_id = notification.id, "notification created successfully");
        Ok(notification)
    }

    #[tracing::instrument(skip(self, patch), fields(notification_id = %id))]
    async fn update(
        &self,
        id: i32,
        patch: &NotificationPatch,
    ) -> Result<Option<Notification>, RepositoryError> {
        let Some(UpdateStatement { sql, args }) = build_update(id, patch) else {
            return Err(RepositoryError::NothingToUpdate);
        };
        tracing::debug!(%sql, bind_count = args.len(), "updating notification");

        let mut query = sqlx::query_as::<_, Notification>(&sql);
        for arg in args {
            query = match arg {
                UpdateArg::Int(value) => query.bind(value),
                UpdateArg::Text(value) => query.bind(value),
            };
        }

        let notification = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(updated = notification.is_some(), "update executed");
        Ok(notification)
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    async fn delete(&self, id: i32) -> Result<u64, RepositoryError> {
        tracing::debug!("deleting notification");

        let result = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(rows_affected = result.rows_affected(), "delete executed");
        Ok(result.rows_affected())
    }
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
