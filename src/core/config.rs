//! Configuration: where the server lives and who we are.
//!
//! Resolution order, strongest last: `config.toml` in the platform config
//! directory, then `BRUME_SERVER` / `BRUME_EMAIL` / `BRUME_API_KEY`
//! environment variables, then command-line flags.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Fully resolved credentials, required before the terminal is put into
/// raw mode so a missing key is a plain printed error, not a garbled
/// alternate screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub server_url: String,
    pub email: String,
    pub api_key: String,
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "permacommons", "brume")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Merge config, environment, and flags into usable credentials.
    pub fn resolve(
        &self,
        flag_server: Option<String>,
        flag_email: Option<String>,
    ) -> Result<Credentials, Box<dyn std::error::Error>> {
        let server_url = flag_server
            .or_else(|| env::var("BRUME_SERVER").ok())
            .or_else(|| self.server_url.clone())
            .ok_or("no server configured; set server_url in config.toml or BRUME_SERVER")?;
        let email = flag_email
            .or_else(|| env::var("BRUME_EMAIL").ok())
            .or_else(|| self.email.clone())
            .ok_or("no account email configured; set email in config.toml or BRUME_EMAIL")?;
        let api_key = env::var("BRUME_API_KEY")
            .ok()
            .or_else(|| self.api_key.clone())
            .ok_or("no API key configured; set api_key in config.toml or BRUME_API_KEY")?;

        Ok(Credentials {
            server_url,
            email,
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url = \"https://chat.example.com\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("https://chat.example.com"));
        assert_eq!(config.email, None);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url = [").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let config = Config {
            server_url: Some("https://file.example.com".into()),
            email: Some("file@example.com".into()),
            api_key: Some("file-key".into()),
        };
        let creds = config
            .resolve(Some("https://flag.example.com".into()), None)
            .unwrap();
        assert_eq!(creds.server_url, "https://flag.example.com");
        assert_eq!(creds.email, "file@example.com");
        assert_eq!(creds.api_key, "file-key");
    }

    #[test]
    fn missing_credentials_fail_resolution() {
        let config = Config::default();
        // Guard against ambient env leaking into the assertion.
        if env::var("BRUME_SERVER").is_err() {
            assert!(config.resolve(None, None).is_err());
        }
    }
}
