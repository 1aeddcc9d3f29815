use std::{net::IpAddr, path::Path};

use anyhow::Context;
use beacon_models::email_address::EmailAddressWithName;
use config::{Environment, File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

/// The configuration compiled into the binary. Every other source only
/// overrides keys of this one.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "BEACON_CONFIG";

/// Prefix of environment variables overriding single keys, e.g.
/// `BEACON__EMAIL__SMTP_URL`.
pub const ENV_PREFIX: &str = "BEACON";

/// Load the default config, the files listed in [`CONFIG_PATHS_ENV`] and
/// the environment overrides, in that order.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATHS_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    paths
        .iter()
        .try_fold(builder, |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: Option<String>,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    /// Recipient of contact form messages
    pub email: Option<EmailAddressWithName>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[] as &[PathBuf]).unwrap();

        assert_eq!(config.http.port, 8000);
        assert_eq!(config.email.smtp_url, None);
        assert_eq!(config.email.from.as_email_address().as_str(), "noreply@example.com");
        assert!(config.contact.email.is_none());
        assert_eq!(*config.health.cache_ttl, std::time::Duration::from_secs(10));
    }

    #[test]
    fn files_override_defaults() {
        let path = std::env::temp_dir().join(format!(
            "beacon-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"
            [email]
            smtp_url = "smtp://127.0.0.1:2525"

            [contact]
            email = "Team <hello@example.com>"
            "#,
        )
        .unwrap();

        let config = load_paths(&[&path]);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.http.port, 8000);
        assert_eq!(config.email.smtp_url.as_deref(), Some("smtp://127.0.0.1:2525"));
        let contact = config.contact.email.unwrap();
        assert_eq!(contact.name(), Some("Team"));
        assert_eq!(contact.as_email_address().as_str(), "hello@example.com");
    }

    #[test]
    fn missing_file() {
        let err = load_paths(&["/nonexistent/beacon.toml"]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/beacon.toml"));
    }
}
