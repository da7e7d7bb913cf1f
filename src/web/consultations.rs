use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::db::NewConsultation;
use crate::web::error::WebError;
use crate::web::pages::{SERVICES, Service, find_service};
use crate::web::validation::{is_present, is_valid_email};
use crate::web::{AppState, render, session};

#[derive(Template)]
#[template(path = "book_consultation.html")]
struct BookingPage {
    user: Option<String>,
    services: &'static [Service],
    error: Option<String>,
}

pub async fn form(session: Session) -> Result<Response, WebError> {
    let Some(user) = session::current_user(&session).await else {
        return Ok(Redirect::to("/login").into_response());
    };

    render(&BookingPage {
        user: Some(user.username),
        services: SERVICES,
        error: None,
    })
}

#[derive(Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub service: String,
    pub datetime: String,
    #[serde(default)]
    pub notes: String,
}

fn validate(form: &BookingForm) -> Result<NewConsultation, String> {
    if !is_present(&form.name) {
        return Err("Name is required".to_string());
    }

    if !is_valid_email(form.email.trim()) {
        return Err("Please enter a valid email address".to_string());
    }

    if find_service(&form.service).is_none() {
        return Err("Please choose a service".to_string());
    }

    if !is_present(&form.datetime) {
        return Err("Please pick a date and time".to_string());
    }

    Ok(NewConsultation {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        service: form.service.clone(),
        scheduled_for: form.datetime.trim().to_string(),
        notes: form.notes.trim().to_string(),
    })
}

/// The booking is stored first; confirmation mail is best-effort and a
/// delivery failure never undoes the stored booking.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<BookingForm>,
) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);

    let booking = match validate(&form) {
        Ok(booking) => booking,
        Err(msg) => {
            return render(&BookingPage {
                user,
                services: SERVICES,
                error: Some(msg),
            });
        }
    };

    state
        .store
        .add_consultation(&booking)
        .await
        .map_err(|e| WebError::Persistence(e.to_string()))?;

    state.notifier.send_booking_confirmation(&booking).await;
    metrics::counter!("consultations_booked_total").increment(1);

    Ok(Redirect::to("/?booking=success").into_response())
}
