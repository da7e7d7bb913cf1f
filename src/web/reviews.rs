use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::services::{ReviewEntry, ReviewError};
use crate::web::error::WebError;
use crate::web::{AppState, render, session};

#[derive(Template)]
#[template(path = "reviews.html")]
struct ReviewsPage {
    user: Option<String>,
    reviews: Vec<ReviewEntry>,
    degraded: bool,
    error: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);
    let board = state.reviews.list().await;

    render(&ReviewsPage {
        user,
        reviews: board.entries,
        degraded: board.degraded,
        error: None,
    })
}

#[derive(Deserialize)]
pub struct ReviewForm {
    pub name: String,
    pub text: String,
    pub rating: i32,
}

/// A plain 401, not a redirect. The form is only rendered to logged-in
/// users, so an anonymous POST is a stale session or a scripted request.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<ReviewForm>,
) -> Result<Response, WebError> {
    let Some(user) = session::current_user(&session).await else {
        return Err(WebError::Unauthorized);
    };

    match state
        .reviews
        .submit(&form.name, &form.text, form.rating)
        .await
    {
        Ok(()) => {
            metrics::counter!("reviews_submitted_total").increment(1);
            Ok(Redirect::to("/reviews").into_response())
        }
        Err(ReviewError::Validation(msg)) => {
            let board = state.reviews.list().await;
            render(&ReviewsPage {
                user: Some(user.username),
                reviews: board.entries,
                degraded: board.degraded,
                error: Some(msg),
            })
        }
        Err(e) => Err(e.into()),
    }
}
