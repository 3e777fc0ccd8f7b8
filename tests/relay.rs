use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use std::sync::{Arc, Mutex};

use portfolio_site::{
    app,
    config::Config,
    mailer::{Mailer, MailerError},
    models::ContactEmail,
    service::ContactService,
};

/// Records every message it is given and optionally fails the delivery.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<ContactEmail>>,
    fail: bool,
}

impl RecordingMailer {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<ContactEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: ContactEmail) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(email);
        if self.fail {
            return Err(MailerError::Io(std::io::Error::other(
                "smtp.internal:25 refused connection",
            )));
        }
        Ok(())
    }
}

fn router(mailer: Arc<RecordingMailer>) -> Router {
    let config = Config::default();
    let service = Arc::new(ContactService::from_config(&config, mailer));
    app(service, &config)
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact.php")
        .header(header::HOST, "portfolio.example")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_submission_is_relayed_once() {
    let mailer = Arc::new(RecordingMailer::default());

    let (status, body) = send(
        router(mailer.clone()),
        form_request("name=Alice&email=alice%40example.com&message=Hi"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Message sent successfully"})
    );

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.contains("Alice"));
    assert!(sent[0].html_body.contains("<p>Hi</p>"));
    assert!(sent[0].html_body.contains("Sent from: portfolio.example"));
    assert_eq!(sent[0].to, "hello@hijrahassalam.com");
    assert_eq!(sent[0].reply_to, "alice@example.com");
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let mailer = Arc::new(RecordingMailer::default());
        let request = Request::builder()
            .method(method)
            .uri("/contact.php")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router(mailer.clone()), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(body, json!({"error": "Method not allowed"}));
        assert!(mailer.sent().is_empty());
    }
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let bodies = [
        "name=&email=alice%40example.com&message=Hi",
        "name=Alice&email=&message=Hi",
        "name=Alice&email=alice%40example.com&message=+++",
        "name=Alice&email=alice%40example.com",
        "",
    ];

    for body in bodies {
        let mailer = Arc::new(RecordingMailer::default());

        let (status, response) = send(router(mailer.clone()), form_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(response, json!({"error": "All fields are required"}));
        assert!(mailer.sent().is_empty());
    }
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let mailer = Arc::new(RecordingMailer::default());

    let (status, body) = send(
        router(mailer.clone()),
        form_request("name=Alice&email=not-an-email&message=Hi"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid email address"}));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn addresses_with_rfc5322_punctuation_are_accepted() {
    for (encoded, address) in [
        ("o%27brien%40example.com", "o'brien@example.com"),
        ("user%23tag%40example.com", "user#tag@example.com"),
    ] {
        let mailer = Arc::new(RecordingMailer::default());

        let (status, body) = send(
            router(mailer.clone()),
            form_request(&format!("name=Alice&email={encoded}&message=Hi")),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "email {address}");
        assert_eq!(body["success"], json!(true));
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, address);
    }
}

#[tokio::test]
async fn non_breaking_space_counts_as_content() {
    let mailer = Arc::new(RecordingMailer::default());

    let (status, _) = send(
        router(mailer.clone()),
        form_request("name=%C2%A0&email=alice%40example.com&message=Hi"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn repeated_field_keeps_last_value() {
    let mailer = Arc::new(RecordingMailer::default());

    let (status, _) = send(
        router(mailer.clone()),
        form_request("name=A&name=Alice&email=alice%40example.com&message=Hi"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Contact Form Submission from Alice");
}

#[tokio::test]
async fn transport_failure_hides_detail() {
    let mailer = Arc::new(RecordingMailer::failing());

    let (status, body) = send(
        router(mailer.clone()),
        form_request("name=Alice&email=alice%40example.com&message=Hi"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to send message. Please try again later."})
    );
    assert!(!body.to_string().contains("smtp.internal"));
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn html_in_fields_is_escaped() {
    let mailer = Arc::new(RecordingMailer::default());

    let (status, _) = send(
        router(mailer.clone()),
        form_request(
            "name=%3Cscript%3Ex%3C%2Fscript%3E&email=alice%40example.com&message=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = mailer.sent();
    let body = &sent[0].html_body;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(body.contains("&lt;script&gt;x&lt;/script&gt;"));
}

#[tokio::test]
async fn multipart_submission_is_accepted() {
    let mailer = Arc::new(RecordingMailer::default());
    let boundary = "contact-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nAlice\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\nalice@example.com\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"message\"\r\n\r\nHi there\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/contact.php")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, _) = send(router(mailer.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].html_body.contains("<p>Hi there</p>"));
}

#[tokio::test]
async fn undecodable_body_counts_as_empty() {
    let mailer = Arc::new(RecordingMailer::default());
    let request = Request::builder()
        .method("POST")
        .uri("/contact.php")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Alice"}"#))
        .unwrap();

    let (status, body) = send(router(mailer.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "All fields are required"}));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn relay_path_is_configurable() {
    let mailer = Arc::new(RecordingMailer::default());
    let config = Config {
        relay_path: "/api/contact".to_string(),
        ..Config::default()
    };
    let service = Arc::new(ContactService::from_config(&config, mailer.clone()));
    let router = app(service, &config);

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Alice&email=alice%40example.com&message=Hi"))
        .unwrap();

    let (status, _) = send(router.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mailer.sent().len(), 1);

    let request = Request::builder()
        .uri("/api-doc/openapi.json")
        .body(Body::empty())
        .unwrap();

    let (status, doc) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/contact"]["post"].is_object());
    assert!(doc["paths"].get("/contact.php").is_none());
}

#[tokio::test]
async fn openapi_document_lists_relay_endpoint() {
    let mailer = Arc::new(RecordingMailer::default());
    let request = Request::builder()
        .uri("/api-doc/openapi.json")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router(mailer), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/contact.php"]["post"].is_object());
}

#[tokio::test]
async fn static_site_is_served_for_other_routes() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("index.html"), "<h1>Portfolio</h1>").unwrap();

    let mailer = Arc::new(RecordingMailer::default());
    let config = Config {
        site_dir: Some(site.path().to_path_buf()),
        ..Config::default()
    };
    let service = Arc::new(ContactService::from_config(&config, mailer));
    let router = app(service, &config);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>Portfolio</h1>");
}
