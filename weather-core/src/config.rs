use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const PORT_VAR: &str = "OW_HTTP_PORT";
pub const DEFAULT_PORT: &str = "8080";

/// Provider entry in the optional config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Optional on-disk configuration.
///
/// Example TOML:
/// ```toml
/// http_port = "9000"
///
/// [providers.openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    pub http_port: Option<String>,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::ParseFile {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn openweather_api_key(&self) -> Option<&str> {
        self.providers
            .get("openweather")
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }
}

/// Process-wide settings, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub listen_port: String,
}

impl Config {
    /// Resolve from a variable lookup alone. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(lookup, &ConfigFile::default(), None)
    }

    /// Layer the sources: `port_override` > variables > file > default.
    pub fn resolve<F>(
        lookup: F,
        file: &ConfigFile,
        port_override: Option<String>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = non_empty(API_KEY_VAR)
            .or_else(|| file.openweather_api_key().map(str::to_owned))
            .ok_or(ConfigError::MissingApiKey)?;

        let listen_port = port_override
            .filter(|p| !p.is_empty())
            .or_else(|| non_empty(PORT_VAR))
            .or_else(|| file.http_port.clone().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| DEFAULT_PORT.to_string());

        Ok(Self {
            api_key,
            listen_port,
        })
    }

    /// Address handed to the listener.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Config::from_lookup(vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert_eq!(
            err.to_string(),
            "You must set the OPENWEATHER_API_KEY environment variable"
        );
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let err = Config::from_lookup(vars(&[(API_KEY_VAR, "")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn port_defaults_to_8080() {
        let cfg = Config::from_lookup(vars(&[(API_KEY_VAR, "KEY")])).unwrap();
        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.listen_port, "8080");
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn port_read_from_environment() {
        let cfg = Config::from_lookup(vars(&[(API_KEY_VAR, "KEY"), (PORT_VAR, "9191")])).unwrap();
        assert_eq!(cfg.listen_port, "9191");
    }

    #[test]
    fn environment_beats_file_and_flag_beats_environment() {
        let mut file = ConfigFile {
            http_port: Some("7000".into()),
            ..Default::default()
        };
        file.providers.insert(
            "openweather".into(),
            ProviderConfig {
                api_key: "FILE_KEY".into(),
            },
        );

        let cfg = Config::resolve(vars(&[]), &file, None).unwrap();
        assert_eq!(cfg.api_key, "FILE_KEY");
        assert_eq!(cfg.listen_port, "7000");

        let env = vars(&[(API_KEY_VAR, "ENV_KEY"), (PORT_VAR, "7100")]);
        let cfg = Config::resolve(&env, &file, None).unwrap();
        assert_eq!(cfg.api_key, "ENV_KEY");
        assert_eq!(cfg.listen_port, "7100");

        let cfg = Config::resolve(&env, &file, Some("7200".into())).unwrap();
        assert_eq!(cfg.listen_port, "7200");
    }

    #[test]
    fn load_config_file_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "http_port = \"9000\"\n\n[providers.openweather]\napi_key = \"ABC\""
        )
        .unwrap();

        let file = ConfigFile::load(tmp.path()).unwrap();
        assert_eq!(file.http_port.as_deref(), Some("9000"));
        assert_eq!(file.openweather_api_key(), Some("ABC"));
    }

    #[test]
    fn malformed_config_file_is_reported() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "http_port = [").unwrap();

        let err = ConfigFile::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFile { .. }));
    }
}
