//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Address;
use crate::handlers::ConfirmationSettings;
use crate::wallet::ContractInterface;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Signing agent / node JSON-RPC endpoint
    pub rpc_url: String,

    /// Deployed contract address
    pub contract_address: Address,

    /// Interface descriptor (JSON ABI); built-in descriptor when unset
    pub contract_abi_path: Option<PathBuf>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Confirmations required before an operation counts as recorded
    pub confirmations: u64,

    /// Give up waiting for a confirmation after this long; wait forever when unset
    pub confirmation_timeout: Option<Duration>,

    /// How often the watcher polls for a receipt
    pub receipt_poll_interval: Duration,

    /// Upper bound for a single JSON-RPC round trip
    pub rpc_timeout: Duration,

    /// Number of activity entries kept for display
    pub activity_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup("RPC_URL").unwrap_or_else(|| "http://127.0.0.1:8545".to_string());

        let contract_address = lookup("CONTRACT_ADDRESS")
            .ok_or(ConfigError::MissingEnv("CONTRACT_ADDRESS"))?
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CONTRACT_ADDRESS"))?;

        let contract_abi_path = lookup("CONTRACT_ABI_PATH").map(PathBuf::from);

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let confirmations = lookup("CONFIRMATIONS")
            .unwrap_or_else(|| "1".to_string())
            .parse()
            .ok()
            .filter(|n: &u64| *n >= 1)
            .ok_or(ConfigError::InvalidValue("CONFIRMATIONS"))?;

        let confirmation_timeout = lookup("CONFIRMATION_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidValue("CONFIRMATION_TIMEOUT_SECS"))
            })
            .transpose()?;

        let receipt_poll_interval = lookup("RECEIPT_POLL_INTERVAL_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse()
            .ok()
            .filter(|ms: &u64| *ms > 0)
            .map(Duration::from_millis)
            .ok_or(ConfigError::InvalidValue("RECEIPT_POLL_INTERVAL_MS"))?;

        let rpc_timeout = lookup("RPC_TIMEOUT_MS")
            .unwrap_or_else(|| "10000".to_string())
            .parse()
            .ok()
            .filter(|ms: &u64| *ms > 0)
            .map(Duration::from_millis)
            .ok_or(ConfigError::InvalidValue("RPC_TIMEOUT_MS"))?;

        let activity_capacity = lookup("ACTIVITY_CAPACITY")
            .unwrap_or_else(|| "100".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("ACTIVITY_CAPACITY"))?;

        Ok(Self {
            rpc_url,
            contract_address,
            contract_abi_path,
            host,
            port,
            environment,
            confirmations,
            confirmation_timeout,
            receipt_poll_interval,
            rpc_timeout,
            activity_capacity,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn confirmation_settings(&self) -> ConfirmationSettings {
        ConfirmationSettings {
            confirmations: self.confirmations,
            timeout: self.confirmation_timeout,
        }
    }

    /// Interface descriptor from `CONTRACT_ABI_PATH`, or the built-in one
    pub fn load_interface(&self) -> Result<ContractInterface, ConfigError> {
        let interface = match &self.contract_abi_path {
            Some(path) => ContractInterface::from_file(path)
                .map_err(|e| ConfigError::Interface(e.to_string()))?,
            None => ContractInterface::fund_me(),
        };
        interface
            .validate_fund_me()
            .map_err(|e| ConfigError::Interface(e.to_string()))?;
        Ok(interface)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),

    #[error("Unusable contract interface: {0}")]
    Interface(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("CONTRACT_ADDRESS", CONTRACT)]).unwrap();

        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.port, 3000);
        assert_eq!(config.confirmations, 1);
        assert_eq!(config.confirmation_timeout, None);
        assert_eq!(config.receipt_poll_interval, Duration::from_secs(1));
        assert_eq!(config.rpc_timeout, Duration::from_secs(10));
        assert!(!config.is_production());
        assert!(config.load_interface().is_ok());
    }

    #[test]
    fn test_contract_address_required() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::MissingEnv("CONTRACT_ADDRESS"))
        ));
        assert!(matches!(
            load(&[("CONTRACT_ADDRESS", "0x12")]),
            Err(ConfigError::InvalidValue("CONTRACT_ADDRESS"))
        ));
    }

    #[test]
    fn test_confirmation_settings() {
        let config = load(&[
            ("CONTRACT_ADDRESS", CONTRACT),
            ("CONFIRMATIONS", "3"),
            ("CONFIRMATION_TIMEOUT_SECS", "90"),
        ])
        .unwrap();

        let settings = config.confirmation_settings();
        assert_eq!(settings.confirmations, 3);
        assert_eq!(settings.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_zero_confirmations_rejected() {
        assert!(matches!(
            load(&[("CONTRACT_ADDRESS", CONTRACT), ("CONFIRMATIONS", "0")]),
            Err(ConfigError::InvalidValue("CONFIRMATIONS"))
        ));
    }

    #[test]
    fn test_rpc_timeout() {
        let config = load(&[("CONTRACT_ADDRESS", CONTRACT), ("RPC_TIMEOUT_MS", "250")]).unwrap();
        assert_eq!(config.rpc_timeout, Duration::from_millis(250));

        for bad in ["0", "soon"] {
            assert!(matches!(
                load(&[("CONTRACT_ADDRESS", CONTRACT), ("RPC_TIMEOUT_MS", bad)]),
                Err(ConfigError::InvalidValue("RPC_TIMEOUT_MS"))
            ));
        }
    }

    #[test]
    fn test_missing_abi_file() {
        let config = load(&[
            ("CONTRACT_ADDRESS", CONTRACT),
            ("CONTRACT_ABI_PATH", "/nonexistent/abi.json"),
        ])
        .unwrap();
        assert!(matches!(
            config.load_interface(),
            Err(ConfigError::Interface(_))
        ));
    }
}
