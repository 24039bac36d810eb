use std::path::PathBuf;

use crate::error::{DashboardError, DashboardResult};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Where and how the dashboard server listens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Verbose request logging and a printed URL on start-up
    pub debug: bool,

    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `DEBUG` and `STATIC_DIR` from the process environment
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup
    ///
    /// Missing variables fall back to the defaults. `DEBUG` is on only when it
    /// equals `true`, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use zest_dashboard::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_lookup(|key| match key {
    ///     "PORT" => Some("9000".to_string()),
    ///     "DEBUG" => Some("TRUE".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.port, 9000);
    /// assert!(config.debug);
    /// assert_eq!(config.host, "0.0.0.0");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                DashboardError::Config(format!("PORT must be a port number, got {:?}: {}", raw, e))
            })?,
            None => defaults.port,
        };

        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let debug = lookup("DEBUG")
            .map(|d| d.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.debug);

        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Ok(Self {
            host,
            port,
            debug,
            static_dir,
        })
    }

    /// `host:port`, suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
