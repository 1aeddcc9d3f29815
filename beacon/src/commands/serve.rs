use beacon_config::Config;
use beacon_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;
    if email.is_configured() {
        info!("Connecting to smtp server");
        if let Err(err) = email.ping().await {
            warn!("Failed to ping smtp server: {err:#}");
        }
    } else {
        warn!("No smtp server configured, contact messages will be rejected");
    }

    if config.contact.email.is_none() {
        warn!("No contact recipient configured, contact messages will be rejected");
    }

    let server = environment::rest_server(&config, email);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
