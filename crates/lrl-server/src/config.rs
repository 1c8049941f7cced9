use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use lrl_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// The admin address injected into the registry at startup.
    pub admin: Address,
    /// Path to the ledger journal. `None` keeps state in memory only.
    pub journal_path: Option<PathBuf>,
    /// Allow cross-origin requests (the consumer is a browser wallet app).
    pub enable_cors: bool,
    /// Gate transfers on a stored sender KYC profile.
    pub require_kyc: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9620".parse().unwrap(),
            admin: Address::ZERO,
            journal_path: None,
            enable_cors: true,
            require_kyc: false,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file.
    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:9620".parse::<SocketAddr>().unwrap());
        assert!(c.journal_path.is_none());
        assert!(c.enable_cors);
        assert!(!c.require_kyc);
    }

    #[test]
    fn toml_roundtrip() {
        let rendered = r#"
            bind_addr = "0.0.0.0:8080"
            admin = "0xf29bbcfb987f3618515ddde75d6cad34cc1855d7"
            journal_path = "/var/lib/lrl/ledger.journal"
            enable_cors = false
            require_kyc = true
        "#;
        let config: ServerConfig = toml::from_str(rendered).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.admin,
            Address::from_hex("0xf29bbcfb987f3618515ddde75d6cad34cc1855d7").unwrap()
        );
        assert!(config.require_kyc);
    }
}
