use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::services::AuthError;
use crate::web::error::WebError;
use crate::web::{AppState, render, session};

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterPage {
    user: Option<String>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage {
    user: Option<String>,
    error: Option<String>,
}

pub async fn register_form(session: Session) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);
    render(&RegisterPage { user, error: None })
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, WebError> {
    match state
        .auth
        .register(&form.username, &form.password, &form.confirm_password)
        .await
    {
        Ok(user) => {
            session::establish(&session, &user).await?;
            state.notifier.send_welcome(&user.username).await;
            metrics::counter!("user_registrations_total").increment(1);
            Ok(Redirect::to("/").into_response())
        }
        Err(
            e @ (AuthError::PasswordMismatch
            | AuthError::DuplicateUsername
            | AuthError::Validation(_)),
        ) => {
            let page = RegisterPage {
                user: None,
                error: Some(e.to_string()),
            };
            render(&page)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(session: Session) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);
    render(&LoginPage { user, error: None })
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match state.auth.login(&form.username, &form.password).await {
        Ok(user) => {
            session::establish(&session, &user).await?;
            metrics::counter!("user_logins_total", "outcome" => "success").increment(1);
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            metrics::counter!("user_logins_total", "outcome" => "rejected").increment(1);
            let page = LoginPage {
                user: None,
                error: Some(AuthError::InvalidCredentials.to_string()),
            };
            render(&page)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(session: Session) -> Redirect {
    session::clear(&session).await;
    Redirect::to("/")
}
