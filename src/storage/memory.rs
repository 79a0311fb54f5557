//! In-memory account store.
//!
//! Backs local development when `DATABASE_URL` is unset, and the integration
//! tests. Not meant for production: data lives only as long as the process.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use vidstream_core::AppError;

use crate::modules::channels::model::ChannelProfile;
use crate::modules::users::model::{NewUser, User, WatchHistoryEntry};

use super::UserStore;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    /// (subscriber, channel) pairs.
    subscriptions: RwLock<HashSet<(Uuid, Uuid)>>,
    history: RwLock<HashMap<Uuid, Vec<WatchHistoryEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a subscription edge. Test/dev helper, not part of [`UserStore`].
    pub fn add_subscription(&self, subscriber: Uuid, channel: Uuid) {
        self.subscriptions
            .write()
            .expect("subscriptions lock poisoned")
            .insert((subscriber, channel));
    }

    /// Seed a watch-history entry. Test/dev helper, not part of [`UserStore`].
    pub fn record_watch(&self, user_id: Uuid, entry: WatchHistoryEntry) {
        self.history
            .write()
            .expect("history lock poisoned")
            .entry(user_id)
            .or_default()
            .push(entry);
    }

    fn update_user<F>(&self, id: Uuid, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().expect("users lock poisoned");
        users.get_mut(&id).map(|user| {
            apply(user);
            user.clone()
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            password: new_user.password,
            avatar: new_user.avatar,
            cover_image: new_user.cover_image,
            refresh_token: None,
            created_at: Utc::now(),
        };

        self.users
            .write()
            .expect("users lock poisoned")
            .insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn find_by_identifier(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.read().expect("users lock poisoned");
        let found = users.values().find(|user| {
            username.is_some_and(|u| user.username == u)
                || email.is_some_and(|e| user.email == e)
        });
        Ok(found.cloned())
    }

    async fn identifier_taken(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users
            .values()
            .any(|user| user.username == username || user.email == email))
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        self.update_user(id, |user| {
            user.refresh_token = refresh_token.map(str::to_string);
        });
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), AppError> {
        self.update_user(id, |user| user.password = password.to_string());
        Ok(())
    }

    async fn update_details(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        Ok(self.update_user(id, |user| {
            if let Some(full_name) = full_name {
                user.full_name = full_name.to_string();
            }
            if let Some(email) = email {
                user.email = email.to_string();
            }
        }))
    }

    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError> {
        Ok(self.update_user(id, |user| user.avatar = Some(url.to_string())))
    }

    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError> {
        Ok(self.update_user(id, |user| user.cover_image = Some(url.to_string())))
    }

    async fn channel_profile(
        &self,
        username: &str,
        viewer: Uuid,
    ) -> Result<Option<ChannelProfile>, AppError> {
        let users = self.users.read().expect("users lock poisoned");
        let Some(user) = users.values().find(|user| user.username == username) else {
            return Ok(None);
        };

        let subscriptions = self.subscriptions.read().expect("subscriptions lock poisoned");
        let subscriber_count = subscriptions
            .iter()
            .filter(|(_, channel)| *channel == user.id)
            .count() as i64;
        let subscribed_to_count = subscriptions
            .iter()
            .filter(|(subscriber, _)| *subscriber == user.id)
            .count() as i64;
        let is_subscribed = subscriptions.contains(&(viewer, user.id));

        Ok(Some(ChannelProfile {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            subscriber_count,
            subscribed_to_count,
            is_subscribed,
        }))
    }

    async fn watch_history(&self, user_id: Uuid) -> Result<Vec<WatchHistoryEntry>, AppError> {
        let history = self.history.read().expect("history lock poisoned");
        let mut entries = history.get(&user_id).cloned().unwrap_or_default();
        entries.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        Ok(entries)
    }
}
