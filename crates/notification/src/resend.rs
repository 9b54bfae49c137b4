use serde::{Deserialize, Serialize};

use crate::{Notifier, NotifyError, OutboundMessage, ProviderKind, http::send_checked};

#[derive(Debug, Deserialize, Clone)]
pub struct ResendConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_resend_from")]
    pub from: String,
    #[serde(default = "default_resend_endpoint")]
    pub endpoint: String,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from: default_resend_from(),
            endpoint: default_resend_endpoint(),
        }
    }
}

impl ResendConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

fn default_resend_from() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_resend_endpoint() -> String {
    "https://api.resend.com/emails".to_string()
}

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Primary provider: Resend JSON API with a bearer key.
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl ResendNotifier {
    pub fn new(client: reqwest::Client, config: &ResendConfig) -> Option<Self> {
        let api_key = config.api_key()?;

        Some(Self {
            client,
            endpoint: config.endpoint.to_owned(),
            api_key: api_key.to_owned(),
            from: config.from.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for ResendNotifier {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Resend
    }

    #[tracing::instrument(skip_all, fields(provider = "resend"))]
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ResendEmail {
                from: &self.from,
                to: &message.to,
                reply_to: &message.reply_to,
                subject: &message.subject,
                html: &message.html,
                text: &message.text,
            });

        send_checked(request).await
    }
}
