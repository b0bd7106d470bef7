use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TEMPLATE_DIR: &str = "tmpl";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: Arc<PathBuf>,
    pub template_dir: Arc<PathBuf>,
    pub static_dir: Arc<PathBuf>,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: Arc::new(PathBuf::from(DEFAULT_DATA_DIR)),
            template_dir: Arc::new(PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            static_dir: Arc::new(PathBuf::from(DEFAULT_STATIC_DIR)),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Create configuration with custom values
    pub fn with_custom(
        data_dir: Option<PathBuf>,
        template_dir: Option<PathBuf>,
        static_dir: Option<PathBuf>,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            data_dir: Arc::new(data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))),
            template_dir: Arc::new(
                template_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            ),
            static_dir: Arc::new(static_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))),
            port: port.unwrap_or(DEFAULT_PORT),
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self.host.parse::<IpAddr>().unwrap_or_else(|_| {
            log::warn!("Unparseable host '{}', binding to {}", self.host, DEFAULT_HOST);
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        });
        SocketAddr::new(ip, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
