use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;

use crate::core::backend::DEFAULT_BACKEND_TIMEOUT;
use crate::core::client::DEFAULT_CLIENT_TIMEOUT;
use crate::core::targets::{BackendTarget, default_targets, parse_target_list};

pub const DEFAULT_PREFIX: &str = "/api";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub prefix: Option<String>,
    /// Comma separated backend base URLs, tried in order.
    pub backend_targets: Option<String>,
    pub backend_timeout_secs: Option<u64>,
    pub client_timeout_secs: Option<u64>,
    /// Where the generator page reaches the proxy endpoint.
    pub proxy_base_url: Option<String>,
    /// Daily rolling log files go here; stdout when unset.
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            host: default_host(),
            port: default_port(),
            prefix: None,
            backend_targets: None,
            backend_timeout_secs: None,
            client_timeout_secs: None,
            proxy_base_url: None,
            log_dir: None,
            log_level: None,
        }
    }
}

impl Config {
    pub fn prefix(&self) -> String {
        match self.prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => {
                format!("/{}", prefix.trim_matches('/'))
            }
            _ => DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn targets(&self) -> Result<Vec<BackendTarget>> {
        let targets = match &self.backend_targets {
            Some(raw) => parse_target_list(raw)
                .with_context(|| format!("invalid backend_targets: {raw}"))?,
            None => default_targets(),
        };
        if targets.is_empty() {
            bail!("backend_targets must name at least one backend");
        }
        Ok(targets)
    }

    pub fn backend_timeout(&self) -> Duration {
        self.backend_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT)
    }

    pub fn client_timeout(&self) -> Duration {
        self.client_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CLIENT_TIMEOUT)
    }

    pub fn proxy_base_url(&self) -> String {
        self.proxy_base_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}{}", self.port, self.prefix()))
    }

    /// Longest the proxy can spend before answering: every target timing out.
    pub fn worst_case_backend_wait(&self, targets: usize) -> Duration {
        self.backend_timeout() * targets as u32
    }

    /// True when the page may give up before the proxy has tried every target.
    pub fn client_gives_up_early(&self, targets: usize) -> bool {
        self.client_timeout() < self.worst_case_backend_wait(targets)
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(tracing::Level::INFO)
    }
}

pub fn get_config() -> Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    envy::from_env::<Config>().context("failed to read configuration from environment")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn defaults_are_faithful() {
        let config = from_pairs(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.prefix(), "/api");
        assert_eq!(config.backend_timeout(), Duration::from_secs(10));
        assert_eq!(config.client_timeout(), Duration::from_secs(15));
        assert_eq!(config.targets().unwrap().len(), 3);
        assert_eq!(config.proxy_base_url(), "http://127.0.0.1:3000/api");
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn reads_overrides() {
        let config = from_pairs(&[
            ("PORT", "8080"),
            ("PREFIX", "v1/"),
            ("BACKEND_TARGETS", "http://localhost:8000, http://backup:8000"),
            ("BACKEND_TIMEOUT_SECS", "3"),
            ("CLIENT_TIMEOUT_SECS", "20"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.prefix(), "/v1");
        assert_eq!(config.proxy_base_url(), "http://127.0.0.1:8080/v1");
        let targets = config.targets().unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].to_string(), "http://backup:8000");
        assert_eq!(config.backend_timeout(), Duration::from_secs(3));
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn empty_target_list_is_rejected() {
        let config = from_pairs(&[("BACKEND_TARGETS", " , ")]);
        assert!(config.targets().is_err());
    }

    #[test]
    fn default_budgets_let_client_give_up_early() {
        let config = Config::default();
        assert_eq!(config.worst_case_backend_wait(3), Duration::from_secs(30));
        assert!(config.client_gives_up_early(3));

        let config = Config {
            client_timeout_secs: Some(35),
            ..Config::default()
        };
        assert!(!config.client_gives_up_early(3));
    }
}
