use std::collections::HashSet;
use std::env;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use portfolio_notification::{
    DispatchConfig, FormSubmitConfig, ResendConfig, SendGridConfig, SmtpConfig,
};
use serde::Deserialize;

/// Environment variables read without the `PORTFOLIO__` prefix, mapped to their config key.
const LEGACY_ENV: [(&str, &str); 6] = [
    ("RESEND_API_KEY", "resend.api_key"),
    ("RESEND_FROM", "resend.from"),
    ("SENDGRID_API_KEY", "sendgrid.api_key"),
    ("SENDGRID_FROM", "sendgrid.from"),
    ("CONTACT_TO", "contact.recipient"),
    ("WHATSAPP_NUMBER", "contact.whatsapp_number"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub resend: ResendConfig,
    #[serde(default)]
    pub sendgrid: SendGridConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub formsubmit: FormSubmitConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Chat number offered as a manual channel when every provider failed
    #[serde(default)]
    pub whatsapp_number: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            whatsapp_number: None,
        }
    }
}

fn default_recipient() -> String {
    "maliktriples123789@gmail.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy provider variables (RESEND_API_KEY, SENDGRID_FROM, CONTACT_TO, ...)
    /// 2. Environment variables (PORTFOLIO__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("dispatch.providers"),
        );

        for (var, key) in LEGACY_ENV {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !(1..=60).contains(&self.dispatch.timeout_secs) {
            return Err(format!(
                "Dispatch timeout must be between 1 and 60 seconds, got {}",
                self.dispatch.timeout_secs
            ));
        }
        if self.contact.recipient.trim().is_empty() {
            return Err("Contact recipient must not be empty".to_string());
        }
        if let Some(number) = &self.contact.whatsapp_number {
            portfolio_contact::fallback_digits(number).map_err(|e| e.to_string())?;
        }

        let mut seen = HashSet::new();
        for provider in &self.dispatch.providers {
            if !seen.insert(provider) {
                return Err(format!("Provider `{provider}` listed more than once"));
            }
        }

        for (name, endpoint) in [
            ("resend", &self.resend.endpoint),
            ("sendgrid", &self.sendgrid.endpoint),
            ("formsubmit", &self.formsubmit.endpoint),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| format!("Invalid {name} endpoint `{endpoint}`: {e}"))?;
        }

        Ok(())
    }
}
