//! Domain types and pure logic for the YouTube Focus backend.
//!
//! Nothing in here performs I/O: the storage adapter lives in `focus-db`
//! and the HTTP client in `focus-youtube`. The router only talks to the
//! outside world through the [`provider::VideoProvider`] trait.

pub mod error;
pub mod history;
pub mod identity;
pub mod preferences;
pub mod provider;
pub mod router;
pub mod types;
pub mod video;
