//! Extraction, decoding and saving of Instagram media

pub mod error;
pub mod media;
pub mod save;
pub mod source;

pub use error::{FetchError, Malformed};
pub use media::{MediaItem, MediaResult};
pub use source::{MediaExtractor, RelayExtractor};
