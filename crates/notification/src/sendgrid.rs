use serde::{Deserialize, Serialize};

use crate::{Notifier, NotifyError, OutboundMessage, ProviderKind, http::send_checked};

const SENDER_NAME: &str = "Portfolio Contact";

#[derive(Debug, Deserialize, Clone)]
pub struct SendGridConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default = "default_sendgrid_endpoint")]
    pub endpoint: String,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from: None,
            endpoint: default_sendgrid_endpoint(),
        }
    }
}

impl SendGridConfig {
    /// Key and verified sender, both required.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let from = self.from.as_deref().filter(|f| !f.trim().is_empty())?;

        Some((key, from))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

fn default_sendgrid_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_string()
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendGridMail<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    reply_to: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

/// Secondary provider: SendGrid v3 mail API, plain text body.
pub struct SendGridNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl SendGridNotifier {
    pub fn new(client: reqwest::Client, config: &SendGridConfig) -> Option<Self> {
        let (api_key, from) = config.credentials()?;

        Some(Self {
            client,
            endpoint: config.endpoint.to_owned(),
            api_key: api_key.to_owned(),
            from: from.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for SendGridNotifier {
    fn kind(&self) -> ProviderKind {
        ProviderKind::SendGrid
    }

    #[tracing::instrument(skip_all, fields(provider = "sendgrid"))]
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let mail = SendGridMail {
            personalizations: [Personalization {
                to: [Address {
                    email: &message.to,
                    name: None,
                }],
            }],
            from: Address {
                email: &self.from,
                name: Some(SENDER_NAME),
            },
            reply_to: Address {
                email: &message.reply_to,
                name: Some(&message.reply_name),
            },
            subject: &message.subject,
            content: [Content {
                kind: "text/plain",
                value: &message.text,
            }],
        };

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&mail);

        send_checked(request).await
    }
}
