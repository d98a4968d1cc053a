//! Error types shared across RatePoster crates.

use std::path::PathBuf;

/// Top-level error type for RatePoster operations.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Please upload an image first!")]
    NoImage,

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Font error: {message}")]
    Font { message: String },

    #[error("Layer extraction error: {message}")]
    Layers { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PosterError.
pub type PosterResult<T> = Result<T, PosterError>;

impl PosterError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font {
            message: msg.into(),
        }
    }

    pub fn layers(msg: impl Into<String>) -> Self {
        Self::Layers {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error should be shown to the user as a blocking notice
    /// rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::NoImage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_image_message_matches_notice() {
        assert_eq!(
            PosterError::NoImage.to_string(),
            "Please upload an image first!"
        );
    }

    #[test]
    fn test_user_facing_kinds() {
        assert!(PosterError::decode("bad png").is_user_facing());
        assert!(PosterError::NoImage.is_user_facing());
        assert!(!PosterError::render("oops").is_user_facing());
        assert!(!PosterError::layers("corrupt").is_user_facing());
    }
}
