use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A channel as seen by an authenticated viewer: the owning account's public
/// fields plus derived subscription counts.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    /// Accounts subscribed to this channel.
    pub subscriber_count: i64,
    /// Channels this account subscribes to.
    pub subscribed_to_count: i64,
    /// Whether the requesting viewer subscribes to this channel.
    pub is_subscribed: bool,
}
