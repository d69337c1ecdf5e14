//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{carousel_payload, image_payload, settings_for, video_payload, POST_URL, REEL_URL};
