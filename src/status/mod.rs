//! Status tracking: which movies the user liked, disliked or saved.
//!
//! # Modules
//!
//! - [`catalog`]: Append-only id → movie map with first-seen ordering
//! - [`store`]: The status store and its toggle / load / encode contract

pub mod catalog;
pub mod store;

pub use catalog::Catalog;
pub use store::StatusStore;
