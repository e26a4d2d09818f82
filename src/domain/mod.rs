//! Domain layer for the Cineverse plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific APIs
//! or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie model and the per-movie status flags

pub mod error;
pub mod movie;

pub use error::{CineverseError, Result};
pub use movie::{Movie, StatusRecord};
