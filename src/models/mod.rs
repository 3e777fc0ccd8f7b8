/// Contact fields after escaping, sanitizing and validation.
///
/// Only produced by `ContactService::validate`, so holding one means every
/// field is non-empty and the email is well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Fully composed message handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
}
