use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{Mailer, MailerError, build_message};
use crate::models::ContactEmail;

/// Authenticated SMTP relay over TLS.
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    pub fn new(
        relay: &str,
        port: Option<u16>,
        username: &str,
        password: &str,
    ) -> Result<Self, MailerError> {
        let creds = Credentials::new(username.to_string(), password.to_string());

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(relay)?.credentials(creds);
        if let Some(port) = port {
            builder = builder.port(port);
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpTransport {
    async fn send(&self, email: ContactEmail) -> Result<(), MailerError> {
        let message = build_message(email)?;
        self.transport.send(message).await?;
        Ok(())
    }
}
