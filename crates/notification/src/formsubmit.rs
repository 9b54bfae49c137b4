use reqwest::multipart::Form;
use serde::Deserialize;

use crate::{Notifier, NotifyError, OutboundMessage, ProviderKind, http::send_checked};

const AUTORESPONSE: &str = "Thanks for contacting me! I will get back to you soon.";

#[derive(Debug, Deserialize, Clone)]
pub struct FormSubmitConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_formsubmit_endpoint")]
    pub endpoint: String,
}

impl Default for FormSubmitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_formsubmit_endpoint(),
        }
    }
}

fn default_formsubmit_endpoint() -> String {
    "https://formsubmit.co".to_string()
}

/// Keyless form relay. Posts multipart fields to `{endpoint}/{recipient}`.
pub struct FormSubmitNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl FormSubmitNotifier {
    pub fn new(client: reqwest::Client, config: &FormSubmitConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        Some(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for FormSubmitNotifier {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FormSubmit
    }

    #[tracing::instrument(skip_all, fields(provider = "formsubmit"))]
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let submission = &message.submission;
        let form = Form::new()
            .text("name", submission.name.to_owned())
            .text("email", submission.email.to_owned())
            .text("message", submission.message.to_owned())
            .text("_subject", message.subject.to_owned())
            .text("_replyto", message.reply_to.to_owned())
            .text("_captcha", "false")
            .text("_template", "table")
            .text("_autoresponse", AUTORESPONSE);

        let request = self
            .client
            .post(format!("{}/{}", self.endpoint, message.to))
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form);

        send_checked(request).await
    }
}
