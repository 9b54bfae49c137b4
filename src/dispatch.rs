use std::sync::Arc;

use anyhow::Result;
use portfolio_notification::{
    Dispatcher, FormSubmitNotifier, Notifier, ProviderKind, ResendNotifier, SendGridNotifier,
    SmtpNotifier,
};

use crate::config::Config;

/// Builds the provider chain in the configured order, skipping unconfigured providers.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let timeout = config.dispatch.timeout();
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("portfolio/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();

    for kind in &config.dispatch.providers {
        let notifier: Option<Arc<dyn Notifier>> = match kind {
            ProviderKind::Resend => ResendNotifier::new(client.clone(), &config.resend)
                .map(|n| Arc::new(n) as Arc<dyn Notifier>),
            ProviderKind::SendGrid => SendGridNotifier::new(client.clone(), &config.sendgrid)
                .map(|n| Arc::new(n) as Arc<dyn Notifier>),
            ProviderKind::Smtp => {
                SmtpNotifier::new(&config.smtp, timeout)?.map(|n| Arc::new(n) as Arc<dyn Notifier>)
            }
            ProviderKind::FormSubmit => FormSubmitNotifier::new(client.clone(), &config.formsubmit)
                .map(|n| Arc::new(n) as Arc<dyn Notifier>),
        };

        match notifier {
            Some(notifier) => {
                tracing::info!(provider = %kind, "Email provider enabled");
                notifiers.push(notifier);
            }
            None => tracing::debug!(provider = %kind, "Email provider not configured, skipped"),
        }
    }

    if notifiers.is_empty() {
        tracing::warn!("No email provider configured, contact submissions will fail");
    }

    Ok(Dispatcher::new(config.contact.recipient.to_owned(), notifiers)
        .policy(config.dispatch.delivery_policy)
        .timeout(timeout)
        .fallback_number(config.contact.whatsapp_number.clone()))
}
