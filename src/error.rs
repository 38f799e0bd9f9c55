//! Error types for dungeon layout generation

use std::fmt;

/// Errors that can occur during layout generation or queries
#[derive(Debug, Clone)]
pub enum DungeonError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Generation failed due to an empty or degenerate intermediate result
    GenerationFailed(String),
}

impl fmt::Display for DungeonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DungeonError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            DungeonError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
        }
    }
}

impl std::error::Error for DungeonError {}

/// Result type alias for dungeon operations
pub type Result<T> = std::result::Result<T, DungeonError>;
