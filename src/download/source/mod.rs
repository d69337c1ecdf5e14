//! Extraction source abstraction layer.
//!
//! Provides the `MediaExtractor` trait: the boundary between the session and
//! the unofficial extraction API. The upstream contract is unstable, so
//! implementations are swappable and tests substitute their own.
//!
//! Built-in backend:
//! - `RelayExtractor` — JSON POST to a configurable endpoint, optionally
//!   routed through a CORS-style relay

pub mod relay;

use crate::download::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

pub use relay::{Relay, RelayExtractor};

/// Trait for extraction backends.
///
/// One call is one best-effort attempt: no retry, no backoff.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Human-readable name of this source (e.g., "allorigins-relay")
    fn name(&self) -> &str;

    /// Ask the upstream to describe the media behind an Instagram URL.
    ///
    /// Returns the raw JSON payload; decoding into media happens in the caller.
    async fn extract(&self, url: &Url) -> Result<Value, FetchError>;
}
