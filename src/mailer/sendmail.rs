use async_trait::async_trait;
use lettre::Transport;
use lettre::transport::sendmail::SendmailTransport as LettreSendmail;

use super::{Mailer, MailerError, build_message};
use crate::models::ContactEmail;

/// Hands messages to the host's `sendmail` binary.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    transport: LettreSendmail,
}

impl SendmailTransport {
    pub fn new() -> Self {
        Self {
            transport: LettreSendmail::new(),
        }
    }

    pub fn with_command<S: Into<String>>(command: S) -> Self {
        let command: String = command.into();
        Self {
            transport: LettreSendmail::new_with_command(command),
        }
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for SendmailTransport {
    async fn send(&self, email: ContactEmail) -> Result<(), MailerError> {
        let message = build_message(email)?;

        // lettre's sendmail transport blocks on the child process
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;

        Ok(())
    }
}
