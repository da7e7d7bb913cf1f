//! Domain service for the customer review board.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// A review as rendered on the board. Starter reviews have no timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub name: String,
    pub text: String,
    pub rating: i32,
    pub created_at: Option<String>,
}

/// The full board: starter reviews plus whatever customers have posted.
/// `degraded` is set when stored reviews could not be loaded and only
/// the starter set is shown.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewBoard {
    pub entries: Vec<ReviewEntry>,
    pub degraded: bool,
}

/// Domain service trait for reviews.
#[async_trait::async_trait]
pub trait ReviewService: Send + Sync {
    /// The board for display. Never fails; a storage outage degrades to
    /// the starter reviews alone.
    async fn list(&self) -> ReviewBoard;

    /// Stores a new customer review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for an out-of-range rating or
    /// missing fields.
    async fn submit(&self, name: &str, text: &str, rating: i32) -> Result<(), ReviewError>;
}
