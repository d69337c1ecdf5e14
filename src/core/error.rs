use crate::core::validation::ValidationError;
use crate::download::error::{FetchError, Malformed};
use thiserror::Error;

/// Examples appended to the invalid-URL message.
const URL_EXAMPLES: &str = "Examples:\n\
- Posts: https://www.instagram.com/p/ABC123/\n\
- Reels: https://www.instagram.com/reel/XYZ456/\n\
- Stories: https://www.instagram.com/stories/username/123456789/";

/// Centralized error types for the application
///
/// All errors in the library are converted to this enum for consistent error handling.
/// Uses `thiserror` for automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use instagrab::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("{}", err.user_message());
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// User input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Extraction request failed or returned unusable data
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// HTTP errors while saving media
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Short category used in logs and in the session's error state.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Fetch(err) => err.subcategory(),
            AppError::Config(_) => "config",
            AppError::Http(_) => "http",
            AppError::Io(_) => "io",
        }
    }

    /// Message shown to the user in the error region.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(ValidationError::Empty) => "Please enter an Instagram URL".to_string(),
            AppError::Validation(ValidationError::InvalidUrl(_)) => {
                format!("Please enter a valid Instagram URL\n\n{}", URL_EXAMPLES)
            }
            AppError::Fetch(FetchError::Network(_)) => {
                "Failed to download content. Please check your internet connection.".to_string()
            }
            // Only an upstream complaint that names Instagram reads as blocking
            AppError::Fetch(FetchError::Service(msg)) if msg.contains("Instagram") => {
                "Failed to download content. Instagram may be blocking this request.".to_string()
            }
            AppError::Fetch(FetchError::Service(_)) => "Failed to download content. Please try again later.".to_string(),
            AppError::Fetch(FetchError::MalformedResponse(Malformed::MissingContent)) => {
                "No downloadable content found in this URL".to_string()
            }
            AppError::Fetch(FetchError::MalformedResponse(Malformed::Invalid(_))) => {
                "Unsupported content type or invalid response from server".to_string()
            }
            AppError::Config(err) => format!("Configuration problem: {}", err),
            AppError::Fetch(FetchError::Unknown(_)) | AppError::Http(_) | AppError::Io(_) => {
                "Failed to download content. Please try again later.".to_string()
            }
        }
    }
}
