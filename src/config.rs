use crate::mediaserver::ClientOptions;
use crate::session::ServerDefaults;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub media_server: MediaServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    /// Verbose logging and intent reflection
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaServerConfig {
    /// Default server URL when the session carries none
    pub base_url: Option<String>,
    /// Default API token when the session carries none
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Values given on the command line or in the environment
///
/// Each `Some` replaces the corresponding file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub debug: Option<bool>,
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Load from `path` (any extension the `config` crate knows, optional)
    /// on top of built-in defaults
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "bookshelf-voice")?
            .set_default("service.debug", false)?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 5000_i64)?
            .set_default("media_server.timeout_secs", 10_i64)?
            .set_default("media_server.user_agent", "alexa-audiobookshelf/1.0")?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(port) = overrides.port {
            self.service.http.port = port;
        }
        if let Some(debug) = overrides.debug {
            self.service.debug = debug;
        }
        if overrides.base_url.is_some() {
            self.media_server.base_url = overrides.base_url;
        }
        if overrides.token.is_some() {
            self.media_server.token = overrides.token;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }

    /// Default credentials; empty strings count as unset
    pub fn server_defaults(&self) -> ServerDefaults {
        ServerDefaults {
            base_url: non_empty(&self.media_server.base_url),
            token: non_empty(&self.media_server.token),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.media_server.timeout_secs),
            user_agent: self.media_server.user_agent.clone(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}
