use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::ErrorResponse, mailer::MailerError};

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Mail transport failed: {0}")]
    Transport(#[from] MailerError),
}

impl ContactError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingFields | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Transport details stay in the logs.
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Method not allowed",
            Self::MissingFields => "All fields are required",
            Self::InvalidEmail => "Invalid email address",
            Self::Transport(_) => "Failed to send message. Please try again later.",
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}
