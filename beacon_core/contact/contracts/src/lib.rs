use std::future::Future;

use beacon_models::contact::ValidatedContactPayload;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Whether contact messages can be delivered at all, i.e. both a mail
    /// transport and a recipient are configured.
    fn is_configured(&self) -> bool;

    /// Forward a contact form submission to the configured recipient.
    fn send_message(
        &self,
        payload: ValidatedContactPayload,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Contact messages cannot be delivered because no email service is configured.")]
    NotConfigured,
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_is_configured(mut self, configured: bool) -> Self {
        self.expect_is_configured().once().return_const(configured);
        self
    }

    pub fn with_send_message(
        mut self,
        payload: ValidatedContactPayload,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
