use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{prelude::*, reviews};

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, name: &str, text: &str, rating: i32) -> Result<reviews::Model> {
        let active = reviews::ActiveModel {
            name: Set(name.to_string()),
            text: Set(text.to_string()),
            rating: Set(rating),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(model)
    }

    /// All stored reviews, newest first.
    pub async fn list_newest_first(&self) -> Result<Vec<reviews::Model>> {
        let items = Reviews::find()
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(items)
    }
}
