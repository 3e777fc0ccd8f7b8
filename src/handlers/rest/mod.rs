mod extract;

pub use extract::ContactSubmission;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::HOST},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    config::DEFAULT_RELAY_PATH,
    dto::{ContactForm, ContactResponse, ErrorResponse},
    error::ContactError,
    service::ContactService,
};

#[derive(OpenApi)]
#[openapi(
    paths(submit_contact),
    components(schemas(ContactForm, ContactResponse, ErrorResponse)),
    tags(
        (name = "contact", description = "Contact form mail relay")
    )
)]
pub struct ApiDoc;

/// The API document with the relay operation listed under `relay_path`.
pub fn api_doc(relay_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if let Some(item) = doc.paths.paths.remove(DEFAULT_RELAY_PATH) {
        doc.paths.paths.insert(relay_path.to_string(), item);
    }
    doc
}

#[utoipa::path(
    post,
    path = "/contact.php",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Message relayed", body = ContactResponse),
        (status = 400, description = "Missing field or invalid email address", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Mail transport failed", body = ErrorResponse)
    ),
    tag = "contact"
)]
#[debug_handler]
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    headers: HeaderMap,
    ContactSubmission(form): ContactSubmission,
) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match service.submit(form, host).await {
        Ok(()) => (StatusCode::OK, Json(ContactResponse::sent())).into_response(),
        Err(e) => {
            match &e {
                ContactError::Transport(err) => tracing::error!("Contact form error: {err}"),
                _ => tracing::info!("Rejected contact submission: {e}"),
            }
            e.into_response()
        }
    }
}

#[debug_handler]
pub async fn method_not_allowed() -> Response {
    ContactError::MethodNotAllowed.into_response()
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from contact relay!").into_response()
}

#[debug_handler]
pub async fn openapi(State(doc): State<Arc<utoipa::openapi::OpenApi>>) -> Response {
    (StatusCode::OK, Json(doc.as_ref())).into_response()
}
