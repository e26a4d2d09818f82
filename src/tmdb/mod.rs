//! Remote search client for The Movie Database.
//!
//! The plugin never performs HTTP itself: it asks the Zellij host to issue a
//! `web_request` and receives the status and body later as an event. This
//! module covers both ends of that exchange.
//!
//! - [`endpoint`]: popular / search URL construction
//! - [`listing`]: response parsing and projection to [`Movie`](crate::domain::Movie)

pub mod endpoint;
pub mod listing;

pub use endpoint::{MovieQuery, TmdbEndpoint, API_BASE_URL, POSTER_BASE_URL};
pub use listing::parse_listing;
