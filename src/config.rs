use crate::error::{config_error, AppResult};
use dotenvy::dotenv;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::debug;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8080;

/// Address used when `HOST` is not set (all interfaces)
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the listener binds to
    pub host: IpAddr,
    /// Port the listener binds to
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn load() -> AppResult<Self> {
        if let Err(e) = dotenv() {
            debug!("No .env file found: {}", e);
        }

        let port = parse_port(env::var("PORT").ok().as_deref())?;
        let host = parse_host(env::var("HOST").ok().as_deref())?;

        Ok(Config { host, port })
    }

    /// Socket address to bind
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse the `PORT` value, falling back to the default when unset or empty
pub fn parse_port(value: Option<&str>) -> AppResult<u16> {
    match value {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| config_error(&format!("Invalid PORT value: {}", raw))),
    }
}

/// Parse the `HOST` value, falling back to all interfaces when unset or empty
pub fn parse_host(value: Option<&str>) -> AppResult<IpAddr> {
    match value {
        None | Some("") => Ok(DEFAULT_HOST),
        Some(raw) => raw
            .parse::<IpAddr>()
            .map_err(|_| config_error(&format!("Invalid HOST value: {}", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), 8080);
        assert_eq!(parse_port(Some("")).unwrap(), 8080);
    }

    #[test]
    fn port_is_parsed() {
        assert_eq!(parse_port(Some("3000")).unwrap(), 3000);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(parse_port(Some("eighty")).is_err());
        assert!(parse_port(Some("70000")).is_err());
        assert!(parse_port(Some(" 9090 ")).is_err());
    }

    #[test]
    fn host_defaults_to_all_interfaces() {
        assert_eq!(parse_host(None).unwrap(), DEFAULT_HOST);
        assert_eq!(
            parse_host(Some("127.0.0.1")).unwrap(),
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        );
        assert!(parse_host(Some("localhost:80")).is_err());
    }

    #[test]
    fn default_addr_binds_port_8080() {
        let config = Config::default();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }
}
