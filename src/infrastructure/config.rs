use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub provider: ProviderSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Directory with the chart page, served at `/` when set
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    #[serde(default = "default_from_currency")]
    pub from_currency: String,
    #[serde(default = "default_to_currency")]
    pub to_currency: String,
    #[serde(default = "default_is_extended")]
    pub is_extended: bool,
    /// Value for the upstream `Authorization` header
    pub authorization: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_from_currency() -> String {
    "USD".to_string()
}

fn default_to_currency() -> String {
    "JPY".to_string()
}

fn default_is_extended() -> bool {
    true
}

/// `config/rates.toml`, overridden by `RATES__SECTION__KEY` environment variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/rates"))
        .add_source(config::Environment::with_prefix("RATES").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    #[test]
    fn test_defaults_fill_missing_keys() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "[provider]\nbase_url = \"http://localhost:9000/rates/\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.server.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.server.static_dir, None);
        assert_eq!(cfg.provider.from_currency, "USD");
        assert_eq!(cfg.provider.to_currency, "JPY");
        assert!(cfg.provider.is_extended);
        assert_eq!(cfg.provider.authorization, None);
    }

    #[test]
    fn test_bundled_config_parses() {
        let settings = Config::builder()
            .add_source(File::from_str(
                include_str!("../../config/rates.toml"),
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.server.bind_addr, "0.0.0.0:3000");
        assert!(cfg.provider.base_url.starts_with("https://"));
    }
}
