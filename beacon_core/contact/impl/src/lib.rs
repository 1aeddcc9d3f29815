use std::sync::Arc;

use beacon_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use beacon_email_contracts::{ContentType, Email, EmailService};
use beacon_models::{
    contact::ValidatedContactPayload, email_address::EmailAddressWithName,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureConfig {
    /// Where contact messages are delivered to
    pub recipient: Option<Arc<EmailAddressWithName>>,
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    fn is_configured(&self) -> bool {
        self.config.recipient.is_some() && self.email.is_configured()
    }

    async fn send_message(
        &self,
        payload: ValidatedContactPayload,
    ) -> Result<(), ContactSendMessageError> {
        let Some(recipient) = self.config.recipient.as_deref() else {
            return Err(ContactSendMessageError::NotConfigured);
        };
        if !self.email.is_configured() {
            return Err(ContactSendMessageError::NotConfigured);
        }

        let source = payload.source;
        let email = compose_email(recipient.clone(), payload);

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        info!(%source, "contact message sent");

        Ok(())
    }
}

fn compose_email(recipient: EmailAddressWithName, payload: ValidatedContactPayload) -> Email {
    let ValidatedContactPayload {
        source,
        name,
        email,
        message,
    } = payload;

    let sender = name.as_ref().map_or(email.as_str(), |name| name.as_str());

    Email {
        recipient,
        subject: format!("[Contact Form] Message from {sender}"),
        body: format!(
            "Source: {source}\nName: {}\nEmail: {email}\n\n{}",
            name.as_ref().map_or("(not provided)", |name| name.as_str()),
            message.as_str(),
        ),
        content_type: ContentType::Text,
        reply_to: Some(match name {
            Some(name) => email.with_name(name.into_inner()),
            None => email.into(),
        }),
    }
}
