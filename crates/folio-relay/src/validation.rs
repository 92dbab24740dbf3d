use std::sync::OnceLock;

use regex::Regex;

use crate::contracts::ContactSubmission;
use crate::contracts::MSG_FIELDS_REQUIRED;
use crate::contracts::MSG_INVALID_EMAIL;

const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRejection {
    MissingFields,
    InvalidEmail,
}

impl ContactRejection {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFields => MSG_FIELDS_REQUIRED,
            Self::InvalidEmail => MSG_INVALID_EMAIL,
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| match Regex::new(EMAIL_PATTERN) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::error!(error = %err, "email pattern failed to compile");
            None
        }
    });
    re.as_ref().is_some_and(|re| re.is_match(email))
}

/// Name, email and message must be non-blank and the email well formed.
/// `subject` is free-form and never checked.
pub fn validate_submission(submission: &ContactSubmission) -> Result<(), ContactRejection> {
    let fields = [&submission.name, &submission.email, &submission.message];
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(ContactRejection::MissingFields);
    }
    if !is_valid_email(submission.email.trim()) {
        return Err(ContactRejection::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            subject: None,
        }
    }

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "a@b.co",
            "first.last@example.com",
            "dev+tag@mail.example.org",
            "\"quoted name\"@example.com",
            "root@[192.168.0.1]",
        ] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["plain", "a@b", "a@b.c", "two@@example.com", "a b@example.com", ".a@x.com"] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn blank_fields_are_missing() {
        assert_eq!(
            validate_submission(&submission("  ", "a@b.co", "hi")),
            Err(ContactRejection::MissingFields)
        );
        assert_eq!(
            validate_submission(&submission("Ann", "a@b.co", "")),
            Err(ContactRejection::MissingFields)
        );
    }

    #[test]
    fn bad_email_is_reported_after_presence() {
        let rejection = validate_submission(&submission("Ann", "nope", "hi")).unwrap_err();
        assert_eq!(rejection, ContactRejection::InvalidEmail);
        assert_eq!(rejection.message(), "Please enter a valid e-mail address");
    }

    #[test]
    fn subject_is_not_validated() {
        let mut valid = submission("Ann", "ann@example.com", "hello");
        valid.subject = Some(String::new());
        assert_eq!(validate_submission(&valid), Ok(()));
    }
}
