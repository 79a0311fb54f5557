pub mod auth;
pub mod channels;
pub mod users;

pub use self::users::model::{User, UserProfile};
