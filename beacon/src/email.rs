use anyhow::Context;
use beacon_config::EmailConfig;
use beacon_email_impl::EmailServiceImpl;

/// Set up the SMTP transport. No connection is opened yet.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(config.smtp_url.as_deref(), config.from.clone())
        .context("Failed to set up SMTP transport")
}
