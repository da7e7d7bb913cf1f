use askama::Template;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::web::error::WebError;
use crate::web::{AppState, render, session};

/// A service offering. The slug set is fixed; detail pages for anything
/// else 404.
pub struct Service {
    pub slug: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        slug: "web-design",
        title: "Web Design",
        blurb: "Clean, modern layouts tailored to your brand and your customers.",
    },
    Service {
        slug: "web-development",
        title: "Web Development",
        blurb: "Fast, reliable sites and web apps built on solid foundations.",
    },
    Service {
        slug: "ecommerce",
        title: "E-commerce",
        blurb: "Online stores that are easy to manage and easy to buy from.",
    },
    Service {
        slug: "seo",
        title: "Search Engine Optimization",
        blurb: "Get found by the people already searching for what you do.",
    },
    Service {
        slug: "branding",
        title: "Branding",
        blurb: "Logos, palettes, and voice that make your business memorable.",
    },
    Service {
        slug: "copywriting",
        title: "Copywriting",
        blurb: "Words that explain what you do and why it matters.",
    },
    Service {
        slug: "social-media",
        title: "Social Media",
        blurb: "A consistent presence on the channels your customers use.",
    },
    Service {
        slug: "email-marketing",
        title: "Email Marketing",
        blurb: "Newsletters and campaigns people actually open.",
    },
    Service {
        slug: "analytics",
        title: "Analytics",
        blurb: "Know what is working with clear, honest reporting.",
    },
    Service {
        slug: "site-maintenance",
        title: "Site Maintenance",
        blurb: "Updates, backups, and fixes so your site stays healthy.",
    },
    Service {
        slug: "tech-consulting",
        title: "Tech Consulting",
        blurb: "Practical advice for the technology decisions you are facing.",
    },
];

#[must_use]
pub fn find_service(slug: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.slug == slug)
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct HomePage {
    pub(crate) user: Option<String>,
    pub(crate) contact_sent: bool,
    pub(crate) booking_sent: bool,
    pub(crate) contact_error: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct HomeQuery {
    contact: Option<String>,
    booking: Option<String>,
}

pub async fn home(
    session: Session,
    Query(query): Query<HomeQuery>,
) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);
    render(&HomePage {
        user,
        contact_sent: query.contact.as_deref() == Some("success"),
        booking_sent: query.booking.as_deref() == Some("success"),
        contact_error: None,
    })
}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutPage {
    user: Option<String>,
}

pub async fn about(session: Session) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);
    render(&AboutPage { user })
}

#[derive(Template)]
#[template(path = "services.html")]
struct ServicesPage {
    user: Option<String>,
    services: &'static [Service],
}

pub async fn services(session: Session) -> Result<Response, WebError> {
    let user = session::current_user(&session).await.map(|u| u.username);
    render(&ServicesPage {
        user,
        services: SERVICES,
    })
}

#[derive(Template)]
#[template(path = "service_detail.html")]
struct ServiceDetailPage {
    user: Option<String>,
    service: &'static Service,
}

pub async fn service_detail(
    session: Session,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let Some(user) = session::current_user(&session).await else {
        return Ok(Redirect::to("/login").into_response());
    };

    let service =
        find_service(&slug).ok_or_else(|| WebError::NotFound(format!("No such service: {slug}")))?;

    render(&ServiceDetailPage {
        user: Some(user.username),
        service,
    })
}

#[derive(Template)]
#[template(path = "portfolio.html")]
struct PortfolioPage {
    user: Option<String>,
}

pub async fn portfolio(session: Session) -> Result<Response, WebError> {
    let Some(user) = session::current_user(&session).await else {
        return Ok(Redirect::to("/login").into_response());
    };

    render(&PortfolioPage {
        user: Some(user.username),
    })
}

pub async fn healthz(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| WebError::Internal(format!("Database unreachable: {e}")))?;

    let body = serde_json::json!({
        "status": "ok",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    });

    Ok(Json(body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_catalog_has_eleven_unique_slugs() {
        assert_eq!(SERVICES.len(), 11);
        let mut slugs: Vec<_> = SERVICES.iter().map(|s| s.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 11);
    }

    #[test]
    fn test_find_service() {
        assert!(find_service("web-design").is_some());
        assert!(find_service("time-travel").is_none());
    }
}
