// ABOUTME: Global client configuration: remote endpoint and credentials.
// ABOUTME: Loaded from ~/.tether/config.yml with environment variable overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".tether/config.yml";

pub const ENV_ENDPOINT: &str = "TETHER_ENDPOINT";
pub const ENV_TOKEN: &str = "TETHER_TOKEN";
pub const ENV_USERNAME: &str = "TETHER_USERNAME";
pub const ENV_PASSWORD: &str = "TETHER_PASSWORD";

/// Global configuration shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Global {
    #[serde(default)]
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Global {
    /// Load the global configuration, letting environment variables override
    /// anything read from the config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` when no endpoint is configured at all.
    pub fn load() -> Result<Self> {
        let path = config_path();

        let mut global = match &path {
            Some(p) if p.is_file() => Self::from_path(p)?,
            _ => Self::default(),
        };

        if let Ok(endpoint) = env::var(ENV_ENDPOINT) {
            global.endpoint = endpoint;
        }
        if let Ok(token) = env::var(ENV_TOKEN) {
            global.token = Some(token);
        }
        if let Ok(username) = env::var(ENV_USERNAME) {
            global.username = Some(username);
        }
        if let Ok(password) = env::var(ENV_PASSWORD) {
            global.password = Some(password);
        }

        if global.endpoint.is_empty() {
            return Err(Error::ConfigNotFound(
                path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE)),
            ));
        }

        Ok(global)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn from_path_parses_yaml() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yml");
        fs::write(
            &path,
            "endpoint: http://api.example.com\ntoken: secret\n",
        )
        .unwrap();

        let global = Global::from_path(&path).unwrap();
        assert_eq!(global.endpoint, "http://api.example.com");
        assert_eq!(global.token.as_deref(), Some("secret"));
        assert!(global.username.is_none());
    }

    #[test]
    fn load_reads_environment_overrides() {
        let tmp = tempdir().unwrap();

        temp_env::with_vars(
            [
                ("HOME", Some(tmp.path().to_str().unwrap())),
                ("TETHER_ENDPOINT", Some("http://env.example.com")),
                ("TETHER_TOKEN", Some("envtoken")),
                ("TETHER_USERNAME", None),
                ("TETHER_PASSWORD", None),
            ],
            || {
                let global = Global::load().unwrap();
                assert_eq!(global.endpoint, "http://env.example.com");
                assert_eq!(global.token.as_deref(), Some("envtoken"));
            },
        );
    }

    #[test]
    fn load_without_endpoint_is_config_not_found() {
        let tmp = tempdir().unwrap();

        temp_env::with_vars(
            [
                ("HOME", Some(tmp.path().to_str().unwrap())),
                ("TETHER_ENDPOINT", None),
                ("TETHER_TOKEN", None),
            ],
            || {
                assert!(matches!(
                    Global::load(),
                    Err(Error::ConfigNotFound(_))
                ));
            },
        );
    }

    #[test]
    fn environment_overrides_config_file() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join(".tether")).unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "endpoint: http://file.example.com\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("HOME", Some(tmp.path().to_str().unwrap())),
                ("TETHER_ENDPOINT", Some("http://env.example.com")),
            ],
            || {
                let global = Global::load().unwrap();
                assert_eq!(global.endpoint, "http://env.example.com");
            },
        );
    }
}
