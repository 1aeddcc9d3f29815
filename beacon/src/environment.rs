use std::sync::Arc;

use beacon_config::Config;
use beacon_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use beacon_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use beacon_email_impl::EmailServiceImpl;

pub type Email = EmailServiceImpl;
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
pub type RestServer = beacon_api_rest::RestServer<HealthFeature, ContactFeature>;

/// Wire up the services of the REST server.
pub fn rest_server(config: &Config, email: Email) -> RestServer {
    let contact_feature_config = ContactFeatureConfig {
        recipient: config.contact.email.clone().map(Arc::new),
    };

    let health_feature_config = HealthFeatureConfig {
        cache_ttl: config.health.cache_ttl.into(),
    };

    RestServer::new(
        HealthFeatureServiceImpl::new(email.clone(), health_feature_config),
        ContactFeatureServiceImpl::new(email, contact_feature_config),
    )
}
