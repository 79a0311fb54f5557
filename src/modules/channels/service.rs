use tracing::instrument;
use uuid::Uuid;

use vidstream_core::AppError;

use crate::storage::UserStore;

use super::model::ChannelProfile;

pub struct ChannelService;

impl ChannelService {
    #[instrument(skip(store))]
    pub async fn channel_profile(
        store: &dyn UserStore,
        username: &str,
        viewer: Uuid,
    ) -> Result<ChannelProfile, AppError> {
        store
            .channel_profile(username, viewer)
            .await?
            .ok_or_else(|| AppError::not_found("Channel Not Found"))
    }
}
