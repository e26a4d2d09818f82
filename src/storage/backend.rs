//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over key-value
//! persistence backends. Values are opaque strings (serialized JSON in practice);
//! the backend never interprets them.
//!
//! # Design Philosophy
//!
//! The trait is deliberately tiny: the status store writes whole maps under a
//! fixed key and reads them back once at startup. There is no listing, no
//! deletion and no schema versioning.

use crate::domain::error::Result;

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): one JSON file per key with atomic writes
pub trait Storage: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has ever been written under that key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Implementations must leave the
    /// previous value intact in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
