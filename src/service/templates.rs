use askama::Template;

/// HTML body of the notification sent to the site owner.
///
/// Every field arrives already escaped by [`super::sanitize::escape_html`],
/// which produces `&#039;` for apostrophes, so the template marks them `safe`
/// instead of escaping a second time.
#[derive(Template)]
#[template(
    source = r#"<html>
<head>
    <title>New Contact Form Submission</title>
</head>
<body>
    <h2>New Contact Form Submission</h2>
    <p><strong>Name:</strong> {{ name|safe }}</p>
    <p><strong>Email:</strong> {{ email|safe }}</p>
    <p><strong>Message:</strong></p>
    <p>{{ message|safe }}</p>
    <hr>
    <p><small>Sent from: {{ host|safe }}</small></p>
</body>
</html>
"#,
    ext = "html"
)]
pub struct ContactEmailTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub host: &'a str,
}
