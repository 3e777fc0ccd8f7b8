use async_trait::async_trait;
use lettre::Transport;
use lettre::transport::file::FileTransport as LettreFileTransport;

use std::path::{Path, PathBuf};

use super::{Mailer, MailerError, build_message};
use crate::models::ContactEmail;

/// Writes each message as an `.eml` file, for local development.
#[derive(Debug, Clone)]
pub struct FileTransport {
    transport: LettreFileTransport,
    output_dir: PathBuf,
}

impl FileTransport {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, MailerError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        if !output_dir.exists() {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self {
            transport: LettreFileTransport::new(&output_dir),
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl Mailer for FileTransport {
    async fn send(&self, email: ContactEmail) -> Result<(), MailerError> {
        let message = build_message(email)?;

        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;
        tracing::debug!("Wrote contact message to {}", self.output_dir.display());

        Ok(())
    }
}
