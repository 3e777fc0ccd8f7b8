use lettre::Address;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// Characters kept by [`sanitize_email`] besides ASCII letters and digits.
const EMAIL_PUNCTUATION: &str = "!#$%&'*+-=?^_`{|}~@.[]";

/// Whitespace stripped from both ends of a field. Other Unicode whitespace,
/// such as a non-breaking space, is content.
const FIELD_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

pub fn trim_field(input: &str) -> &str {
    input.trim_matches(FIELD_WHITESPACE)
}

/// Escapes the five HTML-special characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Drops every character that cannot appear in an email address.
///
/// The result is not necessarily a valid address, see [`is_valid_email`].
pub fn sanitize_email(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || EMAIL_PUNCTUATION.contains(*c))
        .collect()
}

/// Accepts any RFC 5322 dot-atom local part that lettre can parse, on a
/// dotted domain ending in an alphabetic top-level label.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || email.parse::<Address>().is_err() {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    let tld_ok = domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    local.len() <= MAX_LOCAL_PART_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && domain.contains('.')
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
        && tld_ok
}
