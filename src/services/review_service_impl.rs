//! `SeaORM` implementation of the `ReviewService` trait.

use async_trait::async_trait;
use tracing::warn;

use crate::db::Store;
use crate::services::review_service::{ReviewBoard, ReviewEntry, ReviewError, ReviewService};
use crate::web::validation::{is_present, is_valid_rating};

/// Starter reviews shown above customer submissions on every load. They
/// live in code rather than the database so a fresh deployment is never
/// an empty board.
const STARTER_REVIEWS: &[(&str, &str, i32)] = &[
    (
        "Jayna Forgie",
        "Dana has been a lifesaver when it comes to all my computer issues. \
         She\u{2019}s patient, professional, and always goes above and beyond.",
        5,
    ),
    (
        "Sam Reynolds",
        "Excellent service and quick turnaround! My website looks amazing, and \
         I couldn\u{2019}t be happier with the process from start to finish.",
        5,
    ),
    (
        "Alex Kim",
        "Professional, efficient, and incredibly knowledgeable. Dana handled \
         everything seamlessly and delivered exactly what I needed.",
        5,
    ),
];

fn starter_entries() -> Vec<ReviewEntry> {
    STARTER_REVIEWS
        .iter()
        .map(|&(name, text, rating)| ReviewEntry {
            name: name.to_string(),
            text: text.to_string(),
            rating,
            created_at: None,
        })
        .collect()
}

pub struct SeaOrmReviewService {
    store: Store,
}

impl SeaOrmReviewService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewService for SeaOrmReviewService {
    async fn list(&self) -> ReviewBoard {
        let mut entries = starter_entries();

        match self.store.list_reviews().await {
            Ok(stored) => {
                entries.extend(stored.into_iter().map(|r| ReviewEntry {
                    name: r.name,
                    text: r.text,
                    rating: r.rating,
                    created_at: Some(r.created_at),
                }));
                ReviewBoard {
                    entries,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load stored reviews; showing starter set only");
                ReviewBoard {
                    entries,
                    degraded: true,
                }
            }
        }
    }

    async fn submit(&self, name: &str, text: &str, rating: i32) -> Result<(), ReviewError> {
        let name = name.trim();
        let text = text.trim();

        if !is_present(name) {
            return Err(ReviewError::Validation("Name is required".to_string()));
        }
        if !is_present(text) {
            return Err(ReviewError::Validation(
                "Review text is required".to_string(),
            ));
        }

        if !is_valid_rating(rating) {
            return Err(ReviewError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        self.store.add_review(name, text, rating).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_reviews_are_three_five_star_entries() {
        let entries = starter_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.rating == 5));
        assert!(entries.iter().all(|e| e.created_at.is_none()));
        assert_eq!(entries[0].name, "Jayna Forgie");
    }
}
