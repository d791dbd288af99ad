use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use crate::core::error::GatewayError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_NWS_BASE_URL: &str = "https://api.weather.gov";
pub const DEFAULT_HOSPITAL_BASE_URL: &str = "https://telnyx-assignment-production.up.railway.app";
pub const DEFAULT_USER_AGENT: &str = "weather-app/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub host: String,
    pub port: u16,
    pub deprecate_rest: bool,
    pub upstreams: UpstreamConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub weather_base_url: String,
    pub hospital_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            weather_base_url: DEFAULT_NWS_BASE_URL.into(),
            hospital_base_url: DEFAULT_HOSPITAL_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: "server".into(),
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            deprecate_rest: false,
            upstreams: UpstreamConfig::default(),
        }
    }
}

/// Optional TOML overlay, pointed to by `GATEWAY_CONFIG`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    mode: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    deprecate_rest: Option<bool>,
    #[serde(default)]
    upstreams: FileUpstreams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileUpstreams {
    weather_base_url: Option<String>,
    hospital_base_url: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Defaults overlaid by environment variables only.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Defaults, then the TOML file named by `GATEWAY_CONFIG` (if any), then env.
    pub fn from_env_and_toml() -> Result<Self, GatewayError> {
        let mut cfg = Self::default();
        if let Some(path) = env_non_empty("GATEWAY_CONFIG") {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| GatewayError::Config(format!("reading {path}: {e}")))?;
            cfg.apply_toml(&raw)?;
        }
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_toml(&mut self, raw: &str) -> Result<(), GatewayError> {
        let file: FileConfig =
            toml::from_str(raw).map_err(|e| GatewayError::Config(e.to_string()))?;
        if let Some(mode) = file.mode {
            self.mode = mode;
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(flag) = file.deprecate_rest {
            self.deprecate_rest = flag;
        }
        let up = file.upstreams;
        if let Some(v) = up.weather_base_url {
            self.upstreams.weather_base_url = v;
        }
        if let Some(v) = up.hospital_base_url {
            self.upstreams.hospital_base_url = v;
        }
        if let Some(v) = up.user_agent {
            self.upstreams.user_agent = v;
        }
        if let Some(v) = up.timeout_secs {
            self.upstreams.timeout_secs = v;
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(mode) = std::env::var("MODE") {
            self.mode = mode;
        }
        if let Some(host) = env_non_empty("HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Ok(v) = std::env::var("DEPRECATE_REST") {
            self.deprecate_rest = !v.is_empty();
        }
        if let Some(v) = env_non_empty("NWS_BASE_URL") {
            self.upstreams.weather_base_url = v;
        }
        if let Some(v) = env_non_empty("HOSPITAL_BASE_URL") {
            self.upstreams.hospital_base_url = v;
        }
        if let Some(v) = env_non_empty("NWS_USER_AGENT") {
            self.upstreams.user_agent = v;
        }
        if let Some(v) = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.upstreams.timeout_secs = v;
        }
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if !matches!(self.mode.as_str(), "server" | "stdio") {
            return Err(GatewayError::Config(format!(
                "Invalid MODE: {}. Must be 'server' or 'stdio'",
                self.mode
            )));
        }
        if self.mode == "server" {
            if self.port == 0 {
                return Err(GatewayError::Config("PORT cannot be 0".into()));
            }
            self.bind_addr()?;
        }
        if self.upstreams.timeout_secs == 0 {
            return Err(GatewayError::Config("UPSTREAM_TIMEOUT_SECS cannot be 0".into()));
        }
        for (key, url) in [
            ("weather_base_url", &self.upstreams.weather_base_url),
            ("hospital_base_url", &self.upstreams.hospital_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(GatewayError::Config(format!("{key} must be an http(s) URL: {url}")));
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, GatewayError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| GatewayError::Config(format!("Invalid HOST: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
