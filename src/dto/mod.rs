use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contact form fields as posted by the browser. Missing fields decode as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ContactForm {
    /// Sender name
    #[serde(default)]
    pub name: String,
    /// Sender email address
    #[serde(default)]
    pub email: String,
    /// Message text
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Message sent successfully".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
