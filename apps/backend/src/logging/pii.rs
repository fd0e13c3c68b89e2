//! Redaction of personal data and credentials in log output.

use std::fmt;

use lazy_regex::{regex, Captures};

/// Masks emails (first character of the local part kept, domain kept) and
/// opaque tokens (base64-like or JWT-shaped runs of 16+ characters).
///
/// Emails are handled first so their domains are not mistaken for tokens.
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b");
    let tokens = regex!(r"\b[A-Za-z0-9+/_-]{16,}(?:\.[A-Za-z0-9+/_-]+)*={0,2}");

    let masked = emails.replace_all(input, |caps: &Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });

    tokens.replace_all(&masked, "[REDACTED_TOKEN]").into_owned()
}

/// Wrapper that redacts when formatted, for use as a tracing field value.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
