//! Runtime configuration loaded from the environment

use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Directory holding the compiled front end
    pub static_dir: PathBuf,
    /// Base URL `/api/*` requests are forwarded to
    pub api_backend_url: String,
    pub upstream_timeout: Duration,
    /// Currency code reported with fees
    pub fee_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            static_dir: PathBuf::from("build"),
            api_backend_url: "http://localhost:8000".to_string(),
            upstream_timeout: Duration::from_secs(30),
            fee_currency: "CAD".to_string(),
        }
    }
}

impl Config {
    /// Read configuration from environment variables, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: try_load("BIND_ADDR", defaults.bind_addr)?,
            port: try_load("PORT", defaults.port)?,
            static_dir: try_load("STATIC_DIR", defaults.static_dir.display())?,
            api_backend_url: try_load::<String>("API_BACKEND_URL", &defaults.api_backend_url)?
                .trim_end_matches('/')
                .to_string(),
            upstream_timeout: Duration::from_secs(try_load(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )?),
            fee_currency: try_load("FEE_CURRENCY", &defaults.fee_currency)?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: impl Display) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .with_context(|| format!("Invalid {key} value: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_uses_default_when_unset() {
        let port: u16 = try_load("CONDO_TEST_UNSET_PORT", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_try_load_reports_bad_value() {
        env::set_var("CONDO_TEST_BAD_PORT", "not-a-port");
        let err = try_load::<u16>("CONDO_TEST_BAD_PORT", 3000).unwrap_err();
        assert!(err.to_string().contains("CONDO_TEST_BAD_PORT"));
        env::remove_var("CONDO_TEST_BAD_PORT");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.fee_currency, "CAD");
        assert_eq!(config.static_dir, PathBuf::from("build"));
    }
}
