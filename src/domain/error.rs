//! Error types for the Cineverse plugin.
//!
//! This module defines the centralized error type [`CineverseError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only remote fetch failures ever reach the user (on the search screen). Storage
//! failures are logged by the status store and the worker, then swallowed.

use thiserror::Error;

/// The main error type for Cineverse plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin execution,
/// from key-value persistence to remote listing fetches and configuration issues.
///
/// # Examples
///
/// ```ignore
/// use cineverse::domain::CineverseError;
///
/// fn read_entry() -> Result<(), CineverseError> {
///     Err(CineverseError::Storage("Failed to read file".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum CineverseError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value backend fails, or when
    /// a persisted payload cannot be encoded or decoded.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    ///
    /// Occurs when the worker cannot initialize its storage backend or a message
    /// cannot be encoded for the trip across the thread boundary.
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote movie listing could not be fetched or understood.
    ///
    /// Covers non-success HTTP statuses, transport failures reported by the host,
    /// and response bodies that are not the expected JSON listing. No attempt is
    /// made to distinguish between them.
    #[error("Fetch error: {0}")]
    Fetch(String),
}

/// A specialized `Result` type for Cineverse operations.
pub type Result<T> = std::result::Result<T, CineverseError>;
