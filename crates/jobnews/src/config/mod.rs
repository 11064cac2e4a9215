use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const DEFAULT_NEWS_HOST: &str = "real-time-news-data.p.rapidapi.com";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application. Read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub providers: ProvidersConfig,
    pub web: WebConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // A missing or unreadable .env file leaves the process environment as is.
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let timeout_secs = env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;
        let timeout = Duration::from_secs(timeout_secs);

        let jobs = ProviderConfig::from_env("JSEARCH", DEFAULT_JSEARCH_HOST, timeout);
        let news = ProviderConfig::from_env("NEWS", DEFAULT_NEWS_HOST, timeout);

        let web_root = env::var("WEB_ROOT").unwrap_or_else(|_| "web".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            providers: ProvidersConfig { jobs, news },
            web: WebConfig {
                root: PathBuf::from(web_root),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Credentials and addressing for both search providers.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    pub jobs: ProviderConfig,
    pub news: ProviderConfig,
}

/// One upstream provider. A missing `api_key` switches its gateway into mock mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ProviderConfig {
    fn from_env(prefix: &str, default_host: &str, timeout: Duration) -> Self {
        let host = non_empty_var(&format!("{prefix}_HOST"))
            .unwrap_or_else(|| default_host.to_string());

        Self {
            host,
            api_key: non_empty_var(&format!("{prefix}_KEY")),
            base_url: non_empty_var(&format!("{prefix}_BASE_URL")),
            timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Base URL requests are issued against, `https://{host}` unless overridden.
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host),
        }
    }
}

/// Location of the single-page application bundle.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub root: PathBuf,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidTimeout,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid u16"),
            ConfigError::InvalidTimeout => {
                write!(f, "PROVIDER_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "PORT",
            "APP_LOG_LEVEL",
            "PROVIDER_TIMEOUT_SECS",
            "JSEARCH_HOST",
            "JSEARCH_KEY",
            "JSEARCH_BASE_URL",
            "NEWS_HOST",
            "NEWS_KEY",
            "NEWS_BASE_URL",
            "WEB_ROOT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.providers.jobs.host, "jsearch.p.rapidapi.com");
        assert_eq!(
            config.providers.news.host,
            "real-time-news-data.p.rapidapi.com"
        );
        assert_eq!(config.providers.jobs.timeout, Duration::from_secs(15));
        assert_eq!(config.web.root, PathBuf::from("web"));
    }

    #[test]
    fn missing_or_blank_keys_leave_providers_unconfigured() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("JSEARCH_KEY", "   ");
        env::set_var("NEWS_KEY", "secret");
        let config = AppConfig::load().expect("config loads");
        assert!(!config.providers.jobs.is_configured());
        assert!(config.providers.news.is_configured());
        assert_eq!(config.providers.news.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn base_url_defaults_to_https_host_and_accepts_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NEWS_BASE_URL", "http://127.0.0.1:9000/");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.providers.jobs.resolved_base_url(),
            "https://jsearch.p.rapidapi.com"
        );
        assert_eq!(
            config.providers.news.resolved_base_url(),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn rejects_invalid_port_and_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORT", "eighty");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));

        reset_env();
        env::set_var("PROVIDER_TIMEOUT_SECS", "-3");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8000));
    }
}
