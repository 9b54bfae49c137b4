use anyhow::Result;
use portfolio_contact::{ContactForm, ContactSubmission, INVALID_FORM_MESSAGE};

/// Push one submission through the dispatcher. Returns whether it was accepted.
pub async fn send(config: crate::config::Config, form: ContactForm) -> Result<bool> {
    let submission = ContactSubmission::from(form);
    if let Err(e) = submission.check() {
        tracing::error!(error = %e, "{INVALID_FORM_MESSAGE}");
        return Ok(false);
    }

    let dispatcher = crate::dispatch::build_dispatcher(&config)?;
    let result = dispatcher.dispatch(&submission).await;

    for attempt in &result.attempts {
        tracing::info!(provider = %attempt.provider, outcome = ?attempt.outcome, "Attempt");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(result.ok)
}

/// Print the providers the current configuration enables, in dispatch order.
pub fn providers(config: crate::config::Config) -> Result<()> {
    print!("{}", provider_report(&config)?);

    Ok(())
}

pub fn provider_report(config: &crate::config::Config) -> Result<String> {
    let dispatcher = crate::dispatch::build_dispatcher(config)?;
    let enabled = dispatcher.providers();
    let mut report = String::new();

    if enabled.is_empty() {
        report.push_str("no provider configured\n");
    }

    for (position, provider) in enabled.iter().enumerate() {
        report.push_str(&format!("{}. {provider}\n", position + 1));
    }

    report.push_str(&format!(
        "delivery policy: {}\n",
        config.dispatch.delivery_policy
    ));

    Ok(report)
}
