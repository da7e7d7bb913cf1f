use askama::Template;
use axum::{
    Router,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, LogMailer, Mailer, Notifier, ReviewService, SeaOrmAuthService, SeaOrmReviewService,
    SmtpMailer,
};

pub mod assets;
pub mod auth;
pub mod consultations;
pub mod contact;
mod error;
mod observability;
pub mod pages;
pub mod reviews;
pub mod session;
pub mod validation;

pub use error::WebError;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,

    pub reviews: Arc<dyn ReviewService>,

    pub notifier: Arc<Notifier>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;

    let auth = Arc::new(SeaOrmAuthService::new(
        store.clone(),
        config.security.clone(),
    ));
    let reviews = Arc::new(SeaOrmReviewService::new(store.clone()));

    let mailer: Arc<dyn Mailer> = if config.mail.enabled {
        Arc::new(SmtpMailer::new(&config.mail).map_err(|e| anyhow::anyhow!("{e}"))?)
    } else {
        Arc::new(LogMailer)
    };

    let notifier = Arc::new(Notifier::new(
        mailer,
        config.mail.from_address.clone(),
        config.mail.operator_address.clone(),
    ));

    Ok(Arc::new(AppState {
        config: Arc::new(RwLock::new(config)),
        store,
        auth,
        reviews,
        notifier,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

/// Renders a page to a full HTML response. Template failures are server
/// bugs and surface as 500s.
pub fn render<T: Template>(page: &T) -> Result<Response, WebError> {
    let html = page
        .render()
        .map_err(|e| WebError::Internal(format!("Template render failed: {e}")))?;
    Ok(Html(html).into_response())
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let secure_cookies = state.config.read().await.server.secure_cookies;

    let pool = state.store.conn.get_sqlite_connection_pool().clone();
    let session_store = SqliteStore::new(pool);
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)));

    let router = Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/services/{slug}", get(pages::service_detail))
        .route("/portfolio", get(pages::portfolio))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/reviews", get(reviews::list).post(reviews::submit))
        .route(
            "/book-consultation",
            get(consultations::form).post(consultations::submit),
        )
        .route("/contact", post(contact::submit))
        .route("/healthz", get(pages::healthz))
        .route("/metrics", get(observability::get_metrics))
        .route("/assets/{*path}", get(assets::serve_asset))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .with_state(state);

    Ok(router)
}
