//! Account storage abstraction.
//!
//! Handlers and middleware talk to [`UserStore`] only; the concrete backend
//! is chosen at startup. [`postgres::PgUserStore`] is the production backend,
//! [`memory::MemoryStore`] backs development without a database and the
//! integration tests.
//!
//! Every lookup returns the full internal [`User`] record; callers project to
//! [`UserProfile`](crate::modules::users::model::UserProfile) before anything
//! reaches a client.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use vidstream_core::AppError;

use crate::modules::channels::model::ChannelProfile;
use crate::modules::users::model::{NewUser, User, WatchHistoryEntry};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Uniqueness of username and email is checked by
    /// the caller via [`identifier_taken`](Self::identifier_taken) first.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Look up by username or email; either may be absent.
    async fn find_by_identifier(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError>;

    /// Whether any account already uses this username or email.
    async fn identifier_taken(&self, username: &str, email: &str) -> Result<bool, AppError>;

    /// Overwrite the stored refresh token. `None` clears it (logout).
    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError>;

    /// Persist a new password digest.
    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), AppError>;

    /// Patch full name and/or email; returns the updated record.
    async fn update_details(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError>;

    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError>;

    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError>;

    /// Channel read model for `username` as seen by `viewer`.
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Uuid,
    ) -> Result<Option<ChannelProfile>, AppError>;

    /// Watch history for an account, most recent first.
    async fn watch_history(&self, user_id: Uuid) -> Result<Vec<WatchHistoryEntry>, AppError>;
}
