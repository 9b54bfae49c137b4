//! SMTP delivery using lettre

use std::time::Duration;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

use crate::{Notifier, NotifyError, OutboundMessage, ProviderKind};

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_smtp_from")]
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: default_smtp_from(),
        }
    }
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty()
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_from() -> String {
    "Portfolio Contact <noreply@example.com>".to_string()
}

/// SMTP relay notifier
///
/// Dropping a pending `send` closes the SMTP conversation before the message is queued.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, timeout: Duration) -> anyhow::Result<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }

        let mailer = if config.username.is_empty() || config.password.is_empty() {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .timeout(Some(timeout))
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                from = %config.from,
                "SMTP notifier initialized with authentication and TLS"
            );

            let creds = Credentials::new(config.username.clone(), config.password.clone());

            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
                .port(config.port)
                .credentials(creds)
                .timeout(Some(timeout))
                .build()
        };

        Ok(Some(Self {
            mailer,
            from: config.from.parse()?,
        }))
    }

    fn build(&self, message: &OutboundMessage) -> Result<Message, NotifyError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| NotifyError::Build(format!("recipient: {e}")))?;
        let reply_to = Mailbox::new(
            Some(message.reply_name.to_owned()),
            message
                .reply_to
                .parse()
                .map_err(|e| NotifyError::Build(format!("reply-to: {e}")))?,
        );

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .reply_to(reply_to)
            .subject(message.subject.to_owned())
            .multipart(MultiPart::alternative_plain_html(
                message.text.to_owned(),
                message.html.to_owned(),
            ))
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Notifier for SmtpNotifier {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Smtp
    }

    #[tracing::instrument(skip_all, fields(provider = "smtp"))]
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let email = self.build(message)?;

        match self.mailer.send(email).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_timeout() => Err(NotifyError::Timeout),
            Err(e) if e.is_permanent() || e.is_transient() => {
                Err(NotifyError::Rejected(e.to_string()))
            }
            Err(e) => Err(NotifyError::Transport(e.to_string())),
        }
    }
}
