use std::sync::Arc;
use tracing::warn;

use crate::db::NewConsultation;

use super::mailer::{MailError, Mailer, OutgoingEmail};

/// Composes and dispatches the site's outbound mail. Account and booking
/// mail is best-effort; the contact form surfaces delivery failures to
/// the sender because the message exists nowhere else.
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from_address: String,
    operator_address: String,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, from_address: String, operator_address: String) -> Self {
        Self {
            mailer,
            from_address,
            operator_address,
        }
    }

    /// Sent after registration. Failure is logged and swallowed; the
    /// account already exists and must not be rolled back over mail.
    pub async fn send_welcome(&self, email: &str) {
        let message = OutgoingEmail {
            to: email.to_string(),
            reply_to: None,
            subject: "Welcome to Dana Digital".to_string(),
            body: format!(
                "Hi,\n\nYour Dana Digital account ({email}) is ready. You can now post \
                 reviews and browse our full service portfolio.\n\nThe Dana Digital team"
            ),
        };

        if let Err(e) = self.mailer.send(&self.from_address, &message).await {
            warn!(to = %email, error = %e, "Failed to send welcome email");
        }
    }

    /// Sent after a booking is stored. Best-effort for the same reason
    /// as the welcome mail; the booking record is the source of truth.
    pub async fn send_booking_confirmation(&self, booking: &NewConsultation) {
        let customer = OutgoingEmail {
            to: booking.email.clone(),
            reply_to: None,
            subject: "Your consultation is booked".to_string(),
            body: format!(
                "Hi {name},\n\nYour consultation for {service} on {date} is booked. \
                 We will reach out shortly to confirm the details.\n\nThe Dana Digital team",
                name = booking.name,
                service = booking.service,
                date = booking.scheduled_for,
            ),
        };

        if let Err(e) = self.mailer.send(&self.from_address, &customer).await {
            warn!(to = %booking.email, error = %e, "Failed to send booking confirmation");
        }

        let operator = OutgoingEmail {
            to: self.operator_address.clone(),
            reply_to: Some(booking.email.clone()),
            subject: format!("New consultation: {} ({})", booking.name, booking.service),
            body: format!(
                "New consultation request\n\nName: {}\nEmail: {}\nService: {}\nDate: {}\nNotes: {}",
                booking.name, booking.email, booking.service, booking.scheduled_for, booking.notes,
            ),
        };

        if let Err(e) = self.mailer.send(&self.from_address, &operator).await {
            warn!(error = %e, "Failed to notify operator of new booking");
        }
    }

    /// Contact form delivery. Errors propagate: the message is not
    /// persisted anywhere, so a silent drop would lose it.
    pub async fn send_contact_message(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<(), MailError> {
        let outgoing = OutgoingEmail {
            to: self.operator_address.clone(),
            reply_to: Some(email.to_string()),
            subject: format!("Contact form message from {name}"),
            body: format!("From: {name} <{email}>\n\n{message}"),
        };

        self.mailer.send(&self.from_address, &outgoing).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, _from: &str, email: &OutgoingEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            if self.fail {
                return Err(MailError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn notifier(mailer: Arc<RecordingMailer>) -> Notifier {
        Notifier::new(
            mailer,
            "no-reply@test.example".to_string(),
            "operator@test.example".to_string(),
        )
    }

    #[tokio::test]
    async fn test_booking_confirmation_goes_to_customer_and_operator() {
        let mailer = RecordingMailer::new(false);
        let booking = NewConsultation {
            name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            service: "web-design".to_string(),
            scheduled_for: "2026-09-15T10:00".to_string(),
            notes: String::new(),
        };

        notifier(mailer.clone()).send_booking_confirmation(&booking).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "pat@example.com");
        assert_eq!(sent[1].to, "operator@test.example");
        assert_eq!(sent[1].reply_to.as_deref(), Some("pat@example.com"));
    }

    #[tokio::test]
    async fn test_booking_confirmation_swallows_transport_failures() {
        let mailer = RecordingMailer::new(true);
        let booking = NewConsultation {
            name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            service: "seo".to_string(),
            scheduled_for: "2026-09-15T10:00".to_string(),
            notes: String::new(),
        };

        // Must not panic or propagate; the booking is already stored.
        notifier(mailer).send_booking_confirmation(&booking).await;
    }

    #[tokio::test]
    async fn test_contact_message_surfaces_transport_failure() {
        let mailer = RecordingMailer::new(true);

        let result = notifier(mailer)
            .send_contact_message("Pat", "pat@example.com", "Hello")
            .await;

        assert!(matches!(result, Err(MailError::Transport(_))));
    }

    #[tokio::test]
    async fn test_contact_message_sets_reply_to() {
        let mailer = RecordingMailer::new(false);

        notifier(mailer.clone())
            .send_contact_message("Pat", "pat@example.com", "Hello")
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "operator@test.example");
        assert_eq!(sent[0].reply_to.as_deref(), Some("pat@example.com"));
        assert!(sent[0].body.contains("Hello"));
    }
}
