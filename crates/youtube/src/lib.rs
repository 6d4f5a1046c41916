//! Client for the YouTube Data API v3.
//!
//! [`api::YouTubeApi`] wraps the two endpoints the app needs and implements
//! [`focus_core::provider::VideoProvider`] so the router can use it.

pub mod api;

pub use api::{YouTubeApi, YouTubeApiError, DEFAULT_BASE_URL};
