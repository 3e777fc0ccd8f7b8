use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::header::CONTENT_TYPE,
};

use std::convert::Infallible;

use crate::dto::ContactForm;

/// Contact form decoded from either a urlencoded or a multipart body.
///
/// Browsers posting a `FormData` object send multipart, plain HTML forms
/// send urlencoded. A repeated field keeps its last value. A body that
/// cannot be decoded yields empty fields, which validation then rejects.
pub struct ContactSubmission(pub ContactForm);

impl<S> FromRequest<S> for ContactSubmission
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        let form = if is_multipart {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart).await.unwrap_or_else(|e| {
                    tracing::warn!("Failed to read multipart contact form: {e}");
                    ContactForm::default()
                }),
                Err(e) => {
                    tracing::warn!("Rejected multipart contact form: {e}");
                    ContactForm::default()
                }
            }
        } else {
            match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => {
                    let mut form = ContactForm::default();
                    for (name, value) in pairs {
                        set_field(&mut form, &name, value);
                    }
                    form
                }
                Err(e) => {
                    tracing::warn!("Failed to decode contact form: {e}");
                    ContactForm::default()
                }
            }
        };

        Ok(Self(form))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ContactForm, MultipartError> {
    let mut form = ContactForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await?;
        set_field(&mut form, &name, value);
    }

    Ok(form)
}

fn set_field(form: &mut ContactForm, name: &str, value: String) {
    match name {
        "name" => form.name = value,
        "email" => form.email = value,
        "message" => form.message = value,
        _ => {}
    }
}
