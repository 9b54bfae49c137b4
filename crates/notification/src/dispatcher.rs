use std::{sync::Arc, time::Duration};

use portfolio_contact::ContactSubmission;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

use crate::{Notifier, NotifyError, OutboundMessage, ProviderKind};

pub const NO_PROVIDER_MESSAGE: &str = "No email provider configured. Set RESEND_API_KEY (Resend) or SENDGRID_API_KEY + SENDGRID_FROM (SendGrid).";
pub const DELIVERY_FAILED_MESSAGE: &str = "Message could not be delivered. Please try again later.";
pub const FALLBACK_MESSAGE: &str = "Email could not be sent. Please use WhatsApp to contact us.";

/// How transport errors are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryPolicy {
    /// Only an explicit acceptance from the provider counts as delivered.
    #[default]
    Confirmed,
    /// A transport error that is not a timeout counts as delivered.
    ///
    /// `ok` then only means the attempt was not aborted.
    Optimistic,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DispatchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub delivery_policy: DeliveryPolicy,
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            delivery_policy: DeliveryPolicy::default(),
            providers: default_providers(),
        }
    }
}

impl DispatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_providers() -> Vec<ProviderKind> {
    ProviderKind::VARIANTS.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Delivered,
    Assumed(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub provider: ProviderKind,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_link: Option<String>,
    #[serde(skip)]
    pub provider: Option<ProviderKind>,
    #[serde(skip)]
    pub attempts: Vec<Attempt>,
}

impl DispatchResult {
    fn delivered(provider: ProviderKind, attempts: Vec<Attempt>) -> Self {
        Self {
            ok: true,
            error: None,
            fallback_link: None,
            provider: Some(provider),
            attempts,
        }
    }

    fn failed(error: &str, fallback_link: Option<String>, attempts: Vec<Attempt>) -> Self {
        Self {
            ok: false,
            error: Some(error.to_owned()),
            fallback_link,
            provider: None,
            attempts,
        }
    }

    pub fn attempted(&self) -> Vec<ProviderKind> {
        self.attempts.iter().map(|a| a.provider).collect()
    }
}

/// Walks the notifiers in order until one of them takes the message.
pub struct Dispatcher {
    notifiers: Vec<Arc<dyn Notifier>>,
    recipient: String,
    policy: DeliveryPolicy,
    timeout: Duration,
    fallback_number: Option<String>,
}

impl Dispatcher {
    pub fn new(recipient: impl Into<String>, notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        Self {
            notifiers,
            recipient: recipient.into(),
            policy: DeliveryPolicy::default(),
            timeout: Duration::from_secs(default_timeout_secs()),
            fallback_number: None,
        }
    }

    pub fn policy(mut self, policy: DeliveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn fallback_number(mut self, number: Option<String>) -> Self {
        self.fallback_number = number.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn providers(&self) -> Vec<ProviderKind> {
        self.notifiers.iter().map(|n| n.kind()).collect()
    }

    #[tracing::instrument(skip_all, fields(providers = self.notifiers.len(), policy = %self.policy))]
    pub async fn dispatch(&self, submission: &ContactSubmission) -> DispatchResult {
        if self.notifiers.is_empty() {
            tracing::error!("No email provider configured");

            return DispatchResult::failed(NO_PROVIDER_MESSAGE, None, Vec::new());
        }

        let message = match OutboundMessage::compose(submission, &self.recipient) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Failed to compose contact message");

                return self.exhausted(submission, Vec::new());
            }
        };

        let mut attempts = Vec::with_capacity(self.notifiers.len());

        for notifier in &self.notifiers {
            let provider = notifier.kind();
            let outcome = tokio::time::timeout(self.timeout, notifier.send(&message))
                .await
                .unwrap_or(Err(NotifyError::Timeout));

            match outcome {
                Ok(()) => {
                    tracing::info!(%provider, "Contact message delivered");
                    attempts.push(Attempt {
                        provider,
                        outcome: AttemptOutcome::Delivered,
                    });

                    return DispatchResult::delivered(provider, attempts);
                }
                Err(NotifyError::Transport(reason)) if self.policy == DeliveryPolicy::Optimistic => {
                    tracing::warn!(
                        %provider,
                        error = %reason,
                        "Transport error treated as delivered under optimistic policy"
                    );
                    attempts.push(Attempt {
                        provider,
                        outcome: AttemptOutcome::Assumed(reason),
                    });

                    return DispatchResult::delivered(provider, attempts);
                }
                Err(e) => {
                    tracing::warn!(%provider, error = %e, "Provider failed, trying next");
                    attempts.push(Attempt {
                        provider,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                }
            }
        }

        self.exhausted(submission, attempts)
    }

    fn exhausted(&self, submission: &ContactSubmission, attempts: Vec<Attempt>) -> DispatchResult {
        tracing::error!(attempts = attempts.len(), "All email providers failed");

        let Some(number) = &self.fallback_number else {
            return DispatchResult::failed(DELIVERY_FAILED_MESSAGE, None, attempts);
        };

        match portfolio_contact::fallback_link(submission, number) {
            Ok(link) => DispatchResult::failed(FALLBACK_MESSAGE, Some(link), attempts),
            Err(e) => {
                tracing::warn!(error = %e, "Unable to build fallback link");

                DispatchResult::failed(DELIVERY_FAILED_MESSAGE, None, attempts)
            }
        }
    }
}
