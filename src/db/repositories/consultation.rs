use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entities::consultations;

/// Field values for a new booking, validated by the caller.
#[derive(Debug, Clone)]
pub struct NewConsultation {
    pub name: String,
    pub email: String,
    pub service: String,
    pub scheduled_for: String,
    pub notes: String,
}

pub struct ConsultationRepository {
    conn: DatabaseConnection,
}

impl ConsultationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, booking: &NewConsultation) -> Result<consultations::Model> {
        let active = consultations::ActiveModel {
            name: Set(booking.name.clone()),
            email: Set(booking.email.clone()),
            service: Set(booking.service.clone()),
            scheduled_for: Set(booking.scheduled_for.clone()),
            notes: Set(booking.notes.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(model)
    }
}
