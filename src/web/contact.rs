use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::web::error::WebError;
use crate::web::pages::HomePage;
use crate::web::validation::{is_present, is_valid_email};
use crate::web::{AppState, session};

#[derive(Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn rejected(user: Option<String>, message: &str) -> Result<Response, WebError> {
    let page = HomePage {
        user,
        contact_sent: false,
        booking_sent: false,
        contact_error: Some(message.to_string()),
    };

    let html = page
        .render()
        .map_err(|e| WebError::Internal(format!("Template render failed: {e}")))?;

    Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
}

/// Contact messages are not persisted; delivery is the whole operation,
/// so a transport failure is surfaced to the submitter. Validation
/// failures re-render the home page with the message next to the form.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);

    if !is_present(&form.name) {
        return rejected(user, "Name is required");
    }
    if !is_valid_email(form.email.trim()) {
        return rejected(user, "Please enter a valid email address");
    }
    if !is_present(&form.message) {
        return rejected(user, "Message is required");
    }

    state
        .notifier
        .send_contact_message(form.name.trim(), form.email.trim(), form.message.trim())
        .await?;

    metrics::counter!("contact_messages_sent_total").increment(1);

    Ok(Redirect::to("/?contact=success").into_response())
}
