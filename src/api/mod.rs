//! API client for the TV 2 Play content service

pub mod client;

pub use client::{build_poster_url, ApiError, PlayClient};
