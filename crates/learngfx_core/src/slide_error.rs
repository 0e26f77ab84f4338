//! Slide error types
//!
//! Errors a slide can report while creating its GPU resources.

use std::fmt;
use std::io;

/// Error type for slide initialization
#[derive(Debug)]
pub enum SlideError {
    /// Shader failed to load or compile
    Shader(String),
    /// Texture failed to load or decode
    Texture(String),
    /// Model failed to load
    Model(String),
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Anything else
    Other(String),
}

impl fmt::Display for SlideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideError::Shader(msg) => write!(f, "Shader error: {}", msg),
            SlideError::Texture(msg) => write!(f, "Texture error: {}", msg),
            SlideError::Model(msg) => write!(f, "Model error: {}", msg),
            SlideError::Io(err) => write!(f, "IO error: {}", err),
            SlideError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SlideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SlideError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SlideError {
    fn from(err: io::Error) -> Self {
        SlideError::Io(err)
    }
}

impl From<String> for SlideError {
    fn from(msg: String) -> Self {
        SlideError::Other(msg)
    }
}

impl From<&str> for SlideError {
    fn from(msg: &str) -> Self {
        SlideError::Other(msg.to_string())
    }
}
