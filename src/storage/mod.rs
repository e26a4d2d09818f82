//! Storage layer for the persisted catalog and status map.
//!
//! This module provides the key-value persistence the status store writes
//! through. It only ever runs inside the background worker.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-per-key implementation with atomic writes
//! - `keys`: The fixed keys the store persists under

pub mod backend;
pub mod json;
pub mod keys;

pub use backend::Storage;
pub use json::JsonStorage;
pub use keys::StoreKey;
