//! Instagrab - resolve Instagram posts, reels and stories into downloadable media
//!
//! Validates a content URL, asks an extraction API (optionally through a
//! CORS-style relay) what media sits behind it, decodes the answer into a
//! strict type and renders preview nodes plus download links.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, URL validation
//! - `download`: extractor boundary, media decoding, saving to disk
//! - `render`: pure state → render tree mapping
//! - `session`: idle/loading/results/error state machine
//! - `cli`: command-line surface
//! - `commands`: fetch / check / interactive flows behind the CLI

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod commands;
pub mod core;
pub mod download;
pub mod render;
pub mod session;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, Settings};
pub use download::{FetchError, MediaExtractor, MediaResult, RelayExtractor};
pub use render::{view, Results, View};
pub use session::{Session, SessionState};
