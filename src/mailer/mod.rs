mod file;
mod sendmail;
mod smtp;

pub use file::FileTransport;
pub use sendmail::SendmailTransport;
pub use smtp::SmtpTransport;

use async_trait::async_trait;
use lettre::{Message, message::header::ContentType};

use std::sync::Arc;

use crate::{config::TransportConfig, models::ContactEmail};

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid email address format: {0}")]
    AddressFormat(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),

    #[error("Sendmail transport error: {0}")]
    Sendmail(#[from] lettre::transport::sendmail::Error),

    #[error("File transport error: {0}")]
    File(#[from] lettre::transport::file::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mail delivery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Delivers a composed contact message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: ContactEmail) -> Result<(), MailerError>;
}

/// Builds the transport selected in the config.
pub fn from_config(config: &TransportConfig) -> Result<Arc<dyn Mailer>, MailerError> {
    let mailer: Arc<dyn Mailer> = match config {
        TransportConfig::Sendmail { command: None } => Arc::new(SendmailTransport::new()),
        TransportConfig::Sendmail {
            command: Some(command),
        } => Arc::new(SendmailTransport::with_command(command)),
        TransportConfig::Smtp {
            relay,
            port,
            username,
            password,
        } => Arc::new(SmtpTransport::new(relay, *port, username, password)?),
        TransportConfig::File { output_dir } => Arc::new(FileTransport::new(output_dir)?),
    };
    Ok(mailer)
}

pub(crate) fn build_message(email: ContactEmail) -> Result<Message, MailerError> {
    let message = Message::builder()
        .from(email.from.parse()?)
        .reply_to(email.reply_to.parse()?)
        .to(email.to.parse()?)
        .subject(email.subject)
        .header(ContentType::TEXT_HTML)
        .body(email.html_body)?;

    Ok(message)
}
