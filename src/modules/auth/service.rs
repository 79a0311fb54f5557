use tracing::instrument;
use uuid::Uuid;

use vidstream_auth::{create_access_token, create_refresh_token};
use vidstream_config::JwtConfig;
use vidstream_core::{AppError, MediaStore, hash_password, verify_password};

use crate::modules::users::model::{NewUser, UserProfile};
use crate::storage::UserStore;
use crate::utils::uploads::{UploadedImage, publish_image};

use super::model::{LoginRequest, RegisterRequest};

/// Freshly issued access/refresh pair.
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthService;

impl AuthService {
    /// Create an account. The duplicate check runs before any media is
    /// published, so a conflicting registration leaves no stored files
    /// behind.
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn register(
        store: &dyn UserStore,
        media: &dyn MediaStore,
        request: RegisterRequest,
        avatar: Option<UploadedImage>,
        cover_image: Option<UploadedImage>,
    ) -> Result<UserProfile, AppError> {
        if store
            .identifier_taken(&request.username, &request.email)
            .await?
        {
            return Err(AppError::conflict("User Already Exists"));
        }

        let Some(avatar) = avatar else {
            return Err(AppError::validation("Avatar is required", vec![]));
        };

        let avatar_url = publish_image(
            media,
            &avatar,
            &format!("avatars/{}-avatar.{}", request.username, avatar.extension),
        )
        .await?;

        let cover_image_url = match &cover_image {
            Some(image) => Some(
                publish_image(
                    media,
                    image,
                    &format!("covers/{}-cover.{}", request.username, image.extension),
                )
                .await?,
            ),
            None => None,
        };

        let password = hash_password(&request.password)?;

        let user = store
            .create(NewUser {
                username: request.username,
                email: request.email,
                full_name: request.full_name,
                password,
                avatar: Some(avatar_url),
                cover_image: cover_image_url,
            })
            .await?;

        Ok(user.into_profile())
    }

    /// Authenticate and issue a fresh session. Persisting the new refresh
    /// token overwrites any previous one, which is the rotation point that
    /// invalidates older sessions.
    #[instrument(skip_all)]
    pub async fn login(
        store: &dyn UserStore,
        request: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(UserProfile, SessionTokens), AppError> {
        if request.username.is_none() && request.email.is_none() {
            return Err(AppError::validation("Email or Username is required", vec![]));
        }

        let user = store
            .find_by_identifier(request.username.as_deref(), request.email.as_deref())
            .await?
            .ok_or_else(|| AppError::unauthorized("User Not Found"))?;

        if !verify_password(&request.password, &user.password)? {
            return Err(AppError::unauthorized("Incorrect Password"));
        }

        let tokens = SessionTokens {
            access_token: create_access_token(user.id, &user.username, &user.email, jwt_config)?,
            refresh_token: create_refresh_token(user.id, jwt_config)?,
        };

        store
            .set_refresh_token(user.id, Some(&tokens.refresh_token))
            .await?;

        Ok((user.into_profile(), tokens))
    }

    /// Clear the stored refresh token. The still-live access token is not
    /// revoked and remains valid until its own expiry.
    #[instrument(skip(store))]
    pub async fn logout(store: &dyn UserStore, account_id: Uuid) -> Result<(), AppError> {
        store.set_refresh_token(account_id, None).await
    }
}
