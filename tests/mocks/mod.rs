//! Mock implementations for session tests
//!
//! This module provides a scripted `MediaExtractor` so the session can be
//! exercised without network access.

pub mod mock_extractor;

pub use mock_extractor::{MockExtractor, MockResponse};
