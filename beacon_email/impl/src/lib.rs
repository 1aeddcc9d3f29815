use anyhow::{anyhow, Context};
use beacon_email_contracts::{ContentType, Email, EmailService};
use beacon_models::email_address::EmailAddressWithName;
use beacon_utils::Apply;
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailServiceImpl {
    /// Create an email service sending from `from` via the SMTP server at
    /// `url`. Without a url the service is unconfigured and every attempt
    /// to send fails.
    ///
    /// No connection is opened here, but the connection pool of a configured
    /// transport is driven by tokio, so this must be called from within a
    /// tokio runtime.
    pub fn new(url: Option<&str>, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = url
            .map(|url| {
                AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
                    .context("Invalid smtp url")
                    .map(|builder| builder.build())
            })
            .transpose()?;

        Ok(Self { from, transport })
    }

    fn transport(&self) -> anyhow::Result<&AsyncSmtpTransport<Tokio1Executor>> {
        self.transport
            .as_ref()
            .ok_or_else(|| anyhow!("No smtp server configured"))
    }
}

impl EmailService for EmailServiceImpl {
    fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let transport = self.transport()?;

        let message = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)?;

        let response = transport.send(message).await?;
        debug!(code = %response.code(), "smtp server responded");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport()?
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
