//! # Vidstream Core
//!
//! Core types, errors, and utilities for the Vidstream API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`response`]: Success response envelope
//! - [`password`]: Secure password hashing and verification
//! - [`media`]: Media storage abstraction with a local-filesystem backend
//!
//! # Example
//!
//! ```ignore
//! use vidstream_core::errors::AppError;
//! use vidstream_core::password::{hash_password, verify_password};
//! use vidstream_core::response::ApiResponse;
//!
//! // Create an error
//! let error = AppError::not_found("User not found");
//!
//! // Hash a password
//! let hash = hash_password("secure_password")?;
//!
//! // Wrap a payload
//! let body = ApiResponse::new(user, "User Created Successfully");
//! ```

pub mod errors;
pub mod media;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use media::{LocalMediaStore, MediaError, MediaStore};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
