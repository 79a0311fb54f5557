//! # Vidstream Config
//!
//! Configuration types for the Vidstream API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing configuration (secret, lifetimes)
//! - [`server`]: Bind address and deployment environment
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`media`]: Media upload limits and storage locations
//!
//! All configs are loaded once at startup via `from_env()` and are immutable
//! afterwards; they are passed by reference into the components that need them.
//!
//! # Example
//!
//! ```ignore
//! use vidstream_config::{JwtConfig, ServerConfig, CorsConfig, MediaConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let media_config = MediaConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod media;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use media::MediaConfig;
pub use server::{Environment, ServerConfig};
