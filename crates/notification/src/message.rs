use askama::Template;
use portfolio_contact::ContactSubmission;
use time::{OffsetDateTime, format_description::well_known::Rfc2822};

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    submitted_at: &'a str,
}

#[derive(Template)]
#[template(path = "contact.txt")]
struct ContactPlainTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Email built once per submission and handed to every notifier in turn.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub to: String,
    pub reply_to: String,
    pub reply_name: String,
    pub subject: String,
    /// Escaped, safe to embed in HTML mail clients.
    pub html: String,
    pub text: String,
    pub submission: ContactSubmission,
}

impl OutboundMessage {
    pub fn compose(submission: &ContactSubmission, to: &str) -> anyhow::Result<Self> {
        let submitted_at = OffsetDateTime::now_utc().format(&Rfc2822)?;

        let html = ContactHtmlTemplate {
            name: &submission.name,
            email: &submission.email,
            subject: &submission.subject,
            message: &submission.message,
            submitted_at: &submitted_at,
        }
        .render()?;

        let text = ContactPlainTemplate {
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
        }
        .render()?;

        Ok(Self {
            to: to.to_owned(),
            reply_to: submission.email.to_owned(),
            reply_name: submission.name.to_owned(),
            subject: format!("{} — {}", submission.subject, submission.name),
            html,
            text,
            submission: submission.clone(),
        })
    }
}
