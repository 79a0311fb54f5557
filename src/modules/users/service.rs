use tracing::instrument;
use uuid::Uuid;

use vidstream_core::{AppError, MediaStore, hash_password, verify_password};

use crate::storage::UserStore;
use crate::utils::uploads::{UploadedImage, publish_image};

use super::model::{
    ChangePasswordRequest, UpdateDetailsRequest, UserProfile, WatchHistoryEntry,
};

pub struct UserService;

impl UserService {
    pub async fn current_user(
        store: &dyn UserStore,
        account_id: Uuid,
    ) -> Result<UserProfile, AppError> {
        let user = store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("User Not Found"))?;

        Ok(user.into_profile())
    }

    #[instrument(skip(store))]
    pub async fn update_details(
        store: &dyn UserStore,
        account_id: Uuid,
        request: UpdateDetailsRequest,
    ) -> Result<UserProfile, AppError> {
        if request.full_name.is_none() && request.email.is_none() {
            return Err(AppError::validation("Either email or name is required", vec![]));
        }

        let user = store
            .update_details(
                account_id,
                request.full_name.as_deref(),
                request.email.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::not_found("User Not Found"))?;

        Ok(user.into_profile())
    }

    /// Verify the old password, then persist a digest of the new one. Tokens
    /// are not re-issued; the existing session remains valid.
    #[instrument(skip_all)]
    pub async fn change_password(
        store: &dyn UserStore,
        account_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("User Not Found"))?;

        if !verify_password(&request.old_password, &user.password)? {
            return Err(AppError::unauthorized("Incorrect Old Password"));
        }

        let digest = hash_password(&request.new_password)?;
        store.update_password(account_id, &digest).await
    }

    #[instrument(skip_all, fields(account_id = %profile.id))]
    pub async fn update_avatar(
        store: &dyn UserStore,
        media: &dyn MediaStore,
        profile: &UserProfile,
        image: UploadedImage,
    ) -> Result<UserProfile, AppError> {
        let url = publish_image(
            media,
            &image,
            &format!("avatars/{}-avatar.{}", profile.username, image.extension),
        )
        .await?;

        let user = store
            .update_avatar(profile.id, &url)
            .await?
            .ok_or_else(|| AppError::not_found("User Not Found"))?;

        Ok(user.into_profile())
    }

    #[instrument(skip_all, fields(account_id = %profile.id))]
    pub async fn update_cover_image(
        store: &dyn UserStore,
        media: &dyn MediaStore,
        profile: &UserProfile,
        image: UploadedImage,
    ) -> Result<UserProfile, AppError> {
        let url = publish_image(
            media,
            &image,
            &format!("covers/{}-cover.{}", profile.username, image.extension),
        )
        .await?;

        let user = store
            .update_cover_image(profile.id, &url)
            .await?
            .ok_or_else(|| AppError::not_found("User Not Found"))?;

        Ok(user.into_profile())
    }

    pub async fn watch_history(
        store: &dyn UserStore,
        account_id: Uuid,
    ) -> Result<Vec<WatchHistoryEntry>, AppError> {
        store.watch_history(account_id).await
    }
}
