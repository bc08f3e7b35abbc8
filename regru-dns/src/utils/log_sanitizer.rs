//! Log sanitization utilities
//!
//! Request bodies carry the account password twice (form field and inside
//! `input_data`), so they are redacted before they reach a debug log.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

const MASK: &str = "***";

/// Truncate a string for safe logging, on a char boundary.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut end = TRUNCATE_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Replace every occurrence of `secret` with a mask, then truncate.
///
/// Covers the forms a secret takes in a request body: raw, URL-encoded, and
/// JSON-escaped inside `input_data` (itself raw or URL-encoded).
pub fn redact_for_log(s: &str, secret: &str) -> String {
    if secret.is_empty() {
        return truncate_for_log(s);
    }

    let mut forms = vec![secret.to_string(), urlencoding::encode(secret).into_owned()];
    if let Some(escaped) = json_escaped(secret) {
        forms.push(urlencoding::encode(&escaped).into_owned());
        forms.push(escaped);
    }
    // Longest first, so a shorter form never splits a longer one.
    forms.sort_by_key(|f| std::cmp::Reverse(f.len()));
    forms.dedup();

    let redacted = forms
        .iter()
        .fold(s.to_string(), |acc, form| acc.replace(form.as_str(), MASK));
    truncate_for_log(&redacted)
}

/// `secret` as it appears between the quotes of a JSON string.
fn json_escaped(secret: &str) -> Option<String> {
    let quoted = serde_json::to_string(secret).ok()?;
    quoted
        .strip_prefix('"')?
        .strip_suffix('"')
        .map(str::to_string)
}
