use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_NAME: &str = "Anonymous";
pub const DEFAULT_EMAIL: &str = "no-reply@example.com";
pub const DEFAULT_SUBJECT: &str = "New message from site";

/// Message shown to the visitor whenever the form is rejected.
pub const INVALID_FORM_MESSAGE: &str = "Please fill all fields with a valid email.";

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// Raw contact form as posted by the site. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A single contact request with defaults applied.
///
/// Lives for one dispatch only and is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ContactSubmission {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "email_shape"))]
    pub email: String,
    pub subject: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_owned()),
            message: message.into(),
        }
    }

    /// Runs the form rules and maps failures into the crate error.
    pub fn check(&self) -> crate::Result<()> {
        self.validate()?;

        Ok(())
    }
}

impl From<ContactForm> for ContactSubmission {
    fn from(form: ContactForm) -> Self {
        Self::new(
            form.name.unwrap_or_else(|| DEFAULT_NAME.to_owned()),
            form.email.unwrap_or_else(|| DEFAULT_EMAIL.to_owned()),
            form.subject,
            form.message.unwrap_or_default(),
        )
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(INVALID_FORM_MESSAGE)));
    }

    Ok(())
}

fn email_shape(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_SHAPE.is_match(value) {
        return Err(
            ValidationError::new("email_shape").with_message(Cow::Borrowed(INVALID_FORM_MESSAGE))
        );
    }

    Ok(())
}
