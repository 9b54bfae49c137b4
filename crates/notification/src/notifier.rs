use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::OutboundMessage;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    Resend,
    SendGrid,
    Smtp,
    FormSubmit,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("provider answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider rejected the message: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out")]
    Timeout,

    #[error("could not build request: {0}")]
    Build(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else if value.is_builder() {
            Self::Build(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// One way of getting a contact message to the site owner.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError>;
}
