pub mod auth_service;
pub mod auth_service_impl;
pub mod mailer;
pub mod notifier;
pub mod review_service;
pub mod review_service_impl;
pub mod smtp_mailer;

pub use auth_service::{AuthError, AuthService, AuthenticatedUser};
pub use auth_service_impl::SeaOrmAuthService;
pub use mailer::{LogMailer, MailError, Mailer, OutgoingEmail};
pub use notifier::Notifier;
pub use review_service::{ReviewBoard, ReviewEntry, ReviewError, ReviewService};
pub use review_service_impl::SeaOrmReviewService;
pub use smtp_mailer::SmtpMailer;
