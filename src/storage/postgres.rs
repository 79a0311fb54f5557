//! PostgreSQL account store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use vidstream_core::AppError;

use crate::modules::channels::model::ChannelProfile;
use crate::modules::users::model::{NewUser, User, WatchHistoryEntry};

use super::UserStore;

const USER_COLUMNS: &str =
    "id, username, email, full_name, password, avatar, cover_image, refresh_token, created_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, full_name, password, avatar, cover_image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.full_name)
        .bind(&new_user.password)
        .bind(&new_user.avatar)
        .bind(&new_user.cover_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn find_by_identifier(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NOT NULL AND username = $1)
                OR ($2::text IS NOT NULL AND email = $2)"
        ))
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn identifier_taken(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET refresh_token = $2::text WHERE id = $1")
            .bind(id)
            .bind(refresh_token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(password)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_details(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET full_name = COALESCE($2::text, full_name),
                 email = COALESCE($3::text, email)
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(full_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET avatar = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET cover_image = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn channel_profile(
        &self,
        username: &str,
        viewer: Uuid,
    ) -> Result<Option<ChannelProfile>, AppError> {
        let profile = sqlx::query_as::<_, ChannelProfile>(
            "SELECT u.id, u.username, u.full_name, u.avatar, u.cover_image,
                (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id)
                    AS subscriber_count,
                (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id)
                    AS subscribed_to_count,
                EXISTS(SELECT 1 FROM subscriptions s
                       WHERE s.channel_id = u.id AND s.subscriber_id = $2)
                    AS is_subscribed
             FROM users u
             WHERE u.username = $1",
        )
        .bind(username)
        .bind(viewer)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn watch_history(&self, user_id: Uuid) -> Result<Vec<WatchHistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, WatchHistoryEntry>(
            "SELECT v.id AS video_id, v.title, v.thumbnail, w.watched_at
             FROM watch_history w
             JOIN videos v ON v.id = w.video_id
             WHERE w.user_id = $1
             ORDER BY w.watched_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
