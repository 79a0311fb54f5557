//! Shared utilities.
//!
//! - [`cookies`]: session cookie construction and the bearer-header fallback
//! - [`uploads`]: multipart image staging and publishing
//! - [`validation`]: credential shape rules shared across request DTOs

pub mod cookies;
pub mod uploads;
pub mod validation;
