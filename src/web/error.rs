use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use crate::services::{AuthError, MailError, ReviewError};

#[derive(Debug)]
pub enum WebError {
    Validation(String),

    Unauthorized,

    NotFound(String),

    Persistence(String),

    Delivery(String),

    Internal(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Validation(msg) => write!(f, "Validation error: {}", msg),
            WebError::Unauthorized => write!(f, "Unauthorized"),
            WebError::NotFound(msg) => write!(f, "Not found: {}", msg),
            WebError::Persistence(msg) => write!(f, "Storage error: {}", msg),
            WebError::Delivery(msg) => write!(f, "Mail delivery error: {}", msg),
            WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    user: Option<String>,
    status: u16,
    message: String,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WebError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            WebError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "You must be logged in to do that".to_string(),
            ),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            WebError::Persistence(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our end. Please try again.".to_string(),
                )
            }
            WebError::Delivery(msg) => {
                tracing::error!("Mail delivery error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "We could not send your message right now. Please try again later.".to_string(),
                )
            }
            WebError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our end. Please try again.".to_string(),
                )
            }
        };

        let page = ErrorPage {
            user: None,
            status: status.as_u16(),
            message,
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, "Something went wrong").into_response()
            }
        }
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(msg) => WebError::Persistence(msg),
            AuthError::Internal(msg) => WebError::Internal(msg),
            other => WebError::Validation(other.to_string()),
        }
    }
}

impl From<ReviewError> for WebError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Validation(msg) => WebError::Validation(msg),
            ReviewError::Database(msg) => WebError::Persistence(msg),
        }
    }
}

impl From<MailError> for WebError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::InvalidMessage(msg) => WebError::Validation(msg),
            MailError::Transport(msg) => WebError::Delivery(msg),
        }
    }
}
