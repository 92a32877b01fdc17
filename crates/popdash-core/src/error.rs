//! Centralized error types for the Popdash application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

use popdash_storage::StorageError;
use popdash_weather::WeatherError;

/// Top-level application error type.
///
/// All errors in the Popdash application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Popup-level errors (validation, sequencing) mapped from the UI crate.
    #[error("Popup error: {0}")]
    Popup(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(e) => e.user_message().to_string(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.".to_string(),
            AppError::Popup(msg) => msg.clone(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}
