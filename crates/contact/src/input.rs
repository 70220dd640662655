use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Shortest accepted message, in UTF-16 code units once trimmed.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Field order in which validation errors are reported.
const REPORTED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Anything but `@` and browser whitespace (see [`is_browser_whitespace`]).
const EMAIL_PART: &str = r"[^@\x{FEFF}[\s--\x{85}]]+";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{EMAIL_PART}@{EMAIL_PART}\.{EMAIL_PART}$"))
        .expect("email pattern is a valid regex")
});

/// The contact form's fields, exactly as typed.
#[derive(Validate, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct FormData {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    pub subject: String,
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl FormData {
    pub fn check(&self) -> folio_shared::Result<()> {
        self.validate()?;

        Ok(())
    }
}

/// `local@domain.tld`, with no whitespace or `@` inside the parts.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validates every field and returns the localized errors in field order.
/// An empty list means the form can be sent.
pub fn validate_form(data: &FormData, locale: &str) -> Vec<String> {
    match data.validate() {
        Ok(()) => vec![],
        Err(errors) => error_messages(&errors, locale),
    }
}

/// Localized messages for validation errors, in field order.
pub fn error_messages(errors: &ValidationErrors, locale: &str) -> Vec<String> {
    let field_errors = errors.field_errors();
    let mut messages = vec![];

    for field in REPORTED_FIELDS {
        let Some(errors) = field_errors.get(field) else {
            continue;
        };

        for error in errors.iter() {
            messages.push(localize(&error.code, locale));
        }
    }

    messages
}

/// Confirmation shown once a valid form is sent.
pub fn sent_message(locale: &str) -> String {
    localize("sent", locale)
}

fn localize(code: &str, locale: &str) -> String {
    rust_i18n::t!(format!("contact.{code}"), locale = locale).to_string()
}

/// Whitespace as browsers trim it: Unicode `White_Space` plus the byte
/// order mark, minus U+0085.
pub fn is_browser_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

fn browser_trim(value: &str) -> &str {
    value.trim_matches(is_browser_whitespace)
}

fn is_blank(value: &str) -> bool {
    browser_trim(value).is_empty()
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::new("name_required"));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_blank(email) {
        return Err(ValidationError::new("email_required"));
    }

    if !is_valid_email(email) {
        return Err(ValidationError::new("email_invalid"));
    }

    Ok(())
}

fn validate_message(message: &str) -> Result<(), ValidationError> {
    let message = browser_trim(message);

    if message.is_empty() {
        return Err(ValidationError::new("message_required"));
    }

    if message.encode_utf16().count() < MIN_MESSAGE_LENGTH {
        return Err(ValidationError::new("message_too_short"));
    }

    Ok(())
}
