use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

const DEFAULT_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml"));

/// Environment variable listing extra config files, separated like `PATH`.
pub const CONFIG_PATHS_ENV: &str = "CONTACT_FORM_CONFIG";

/// Prefix of environment variables overriding single config values.
pub const ENV_PREFIX: &str = "CONTACT_FORM";

/// Loads the bundled defaults, the files listed in [`CONFIG_PATHS_ENV`] and
/// the `CONTACT_FORM__*` environment overrides, in that order.
pub fn load() -> anyhow::Result<Config> {
    load_from(&config_paths(Vec::new()), environment())
}

/// Returns the files listed in [`CONFIG_PATHS_ENV`] followed by `extra`, so
/// that later files take precedence.
pub fn config_paths(extra: Vec<PathBuf>) -> Vec<PathBuf> {
    env::var_os(CONFIG_PATHS_ENV)
        .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .chain(extra)
        .collect()
}

pub fn load_from(paths: &[impl AsRef<Path>], environment: Environment) -> anyhow::Result<Config> {
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
        .add_source(environment)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// The environment source used by [`load`], e.g. `CONTACT_FORM__FORM__NOTIFICATION_TTL=10s`.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub webhook: WebhookConfig,
    pub form: FormConfig,
}

#[derive(Debug, Deserialize)]
pub struct WebhookConfig {
    pub endpoint_override: Option<Url>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct FormConfig {
    pub default_country_code: String,
    pub slow_hint_delay: Duration,
    pub notification_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use pretty_assertions::assert_eq;

    use super::*;

    fn no_env() -> Environment {
        environment().source(Some(Default::default()))
    }

    #[test]
    fn load_default_config() {
        // Act
        let config = load_from(&[] as &[&Path], no_env()).unwrap();

        // Assert
        assert_eq!(config.webhook.endpoint_override, None);
        assert_eq!(*config.webhook.timeout, StdDuration::from_secs(60));
        assert_eq!(config.form.default_country_code, "+54");
        assert_eq!(*config.form.slow_hint_delay, StdDuration::from_secs(3));
        assert_eq!(*config.form.notification_ttl, StdDuration::from_secs(5));
    }

    #[test]
    fn environment_overrides_defaults() {
        // Arrange
        let env = [
            (
                "CONTACT_FORM__WEBHOOK__ENDPOINT_OVERRIDE",
                "http://127.0.0.1:8001/webhook/contact",
            ),
            ("CONTACT_FORM__FORM__NOTIFICATION_TTL", "1m 30s"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        // Act
        let config = load_from(&[] as &[&Path], environment().source(Some(env))).unwrap();

        // Assert
        assert_eq!(
            config.webhook.endpoint_override.unwrap().as_str(),
            "http://127.0.0.1:8001/webhook/contact"
        );
        assert_eq!(*config.form.notification_ttl, StdDuration::from_secs(90));
        assert_eq!(*config.form.slow_hint_delay, StdDuration::from_secs(3));
    }

    #[test]
    fn file_overrides_defaults() {
        // Arrange
        let path = env::temp_dir().join(format!("contact_form_config_{}.toml", std::process::id()));
        std::fs::write(&path, "[form]\ndefault_country_code = \"+598\"\n").unwrap();

        // Act
        let config = load_from(&[&path], no_env());
        std::fs::remove_file(&path).unwrap();

        // Assert
        let config = config.unwrap();
        assert_eq!(config.form.default_country_code, "+598");
        assert_eq!(*config.form.notification_ttl, StdDuration::from_secs(5));
    }

    #[test]
    fn missing_file() {
        let result = load_from(&[Path::new("/nonexistent/contact_form.toml")], no_env());
        assert!(result.is_err());
    }
}
