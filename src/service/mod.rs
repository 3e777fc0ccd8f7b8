pub mod sanitize;
pub mod templates;

use askama::Template;

use std::sync::Arc;

use crate::{
    config::Config,
    dto::ContactForm,
    error::ContactError,
    mailer::{Mailer, MailerError},
    models::{ContactEmail, Submission},
};

use sanitize::{escape_html, is_valid_email, sanitize_email, trim_field};
use templates::ContactEmailTemplate;

/// Validates contact form submissions and relays them to a fixed recipient.
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    recipient: String,
    sender: Option<String>,
}

impl ContactService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        recipient: impl Into<String>,
        sender: Option<String>,
    ) -> Self {
        Self {
            mailer,
            recipient: recipient.into(),
            sender,
        }
    }

    pub fn from_config(config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        Self::new(mailer, config.recipient.clone(), config.sender.clone())
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Escapes name and message, sanitizes the email, then checks that all
    /// three are present and that the email is well formed.
    pub fn validate(form: ContactForm) -> Result<Submission, ContactError> {
        let name = trim_field(&escape_html(&form.name)).to_string();
        let email = trim_field(&sanitize_email(&form.email)).to_string();
        let message = trim_field(&escape_html(&form.message)).to_string();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }

        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(Submission {
            name,
            email,
            message,
        })
    }

    /// Builds the notification sent to the site owner. `host` is the value of
    /// the request's `Host` header.
    pub fn compose(
        &self,
        submission: &Submission,
        host: &str,
    ) -> Result<ContactEmail, MailerError> {
        let html_body = ContactEmailTemplate {
            name: &submission.name,
            email: &escape_html(&submission.email),
            message: &submission.message,
            host: &escape_html(host),
        }
        .render()?;

        Ok(ContactEmail {
            to: self.recipient.clone(),
            from: self
                .sender
                .clone()
                .unwrap_or_else(|| submission.email.clone()),
            reply_to: submission.email.clone(),
            subject: format!("New Contact Form Submission from {}", submission.name),
            html_body,
        })
    }

    pub async fn submit(&self, form: ContactForm, host: &str) -> Result<(), ContactError> {
        let submission = Self::validate(form)?;
        let email = self.compose(&submission, host)?;

        tracing::info!(
            "Relaying contact message from '{}' to '{}'",
            submission.email,
            self.recipient
        );

        self.mailer.send(email).await?;

        tracing::info!("Contact message from {} sent successfully", submission.email);

        Ok(())
    }
}
