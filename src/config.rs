//! Wallet configuration
//!
//! Explicit configuration object passed into each component (wallet store,
//! network selector, transfer flow) instead of ambient global state. Backed
//! by a JSON file at `~/.config/tulobyte/config.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TbError, TbResult};

/// Network the wallet signs transactions for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl std::str::FromStr for Network {
    type Err = TbError;

    fn from_str(s: &str) -> TbResult<Self> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(TbError::invalid_input(format!(
                "Unknown network '{}', expected mainnet or testnet",
                other
            ))),
        }
    }
}

/// Fee batching mode carried into the transaction artifact's `b` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    Normal,
    Hunter,
}

impl BatchMode {
    /// Wire value used in the signed artifact ("1" normal, "0" hunter)
    pub fn flag(self) -> &'static str {
        match self {
            BatchMode::Normal => "1",
            BatchMode::Hunter => "0",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BatchMode::Normal => "normal",
            BatchMode::Hunter => "hunter",
        }
    }
}

impl std::str::FromStr for BatchMode {
    type Err = TbError;

    fn from_str(s: &str) -> TbResult<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(BatchMode::Normal),
            "hunter" => Ok(BatchMode::Hunter),
            other => Err(TbError::invalid_input(format!(
                "Unknown batch mode '{}', expected normal or hunter",
                other
            ))),
        }
    }
}

/// Wallet configuration, loaded once per invocation and passed explicitly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: Network,
    pub wallet_path: PathBuf,
    pub txn_batch: BatchMode,
}

impl Config {
    /// Configuration file path: `~/.config/tulobyte/config.json`
    ///
    /// Inability to resolve the home directory is unrecoverable for a wallet
    /// that persists key material, so the caller treats it as fatal.
    pub fn file_path() -> TbResult<PathBuf> {
        Ok(config_dir()?.join("config.json"))
    }

    /// Default configuration pointing the wallet file into the config dir
    pub fn default_config() -> TbResult<Self> {
        Ok(Self {
            network: Network::Mainnet,
            wallet_path: config_dir()?.join("wallet.tb"),
            txn_batch: BatchMode::Normal,
        })
    }

    /// Load the configuration, creating a default file on first run
    pub fn load() -> TbResult<Self> {
        let path = Self::file_path()?;
        if !path.exists() {
            let config = Self::default_config()?;
            config.save()?;
            return Ok(config);
        }

        let data = fs::read_to_string(&path)
            .map_err(|e| TbError::config_error(format!("Can't read config file: {}", e)))?;
        serde_json::from_str(&data)
            .map_err(|e| TbError::config_error(format!("Malformed config file: {}", e)))
    }

    pub fn save(&self) -> TbResult<()> {
        let path = Self::file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data)
            .map_err(|e| TbError::config_error(format!("Can't write config file: {}", e)))?;
        Ok(())
    }

    /// Data directory for the configured network: `~/tulobyte/<network>`
    pub fn network_dir(&self) -> TbResult<PathBuf> {
        Ok(data_dir()?.join(self.network.as_str()))
    }

    /// Directory holding signed transaction artifacts for this network
    pub fn txns_dir(&self) -> TbResult<PathBuf> {
        Ok(self.network_dir()?.join("txns"))
    }
}

/// Resolve the user's home directory
fn home_dir() -> TbResult<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| TbError::config_error("Can't get user home directory"))
}

fn config_dir() -> TbResult<PathBuf> {
    Ok(home_dir()?.join(".config").join("tulobyte"))
}

fn data_dir() -> TbResult<PathBuf> {
    Ok(home_dir()?.join("tulobyte"))
}

/// Create the config and data directory tree if missing
///
/// Called once at startup. Layout:
/// - `~/.config/tulobyte/` (config + default wallet file)
/// - `~/tulobyte/mainnet/txns/`
/// - `~/tulobyte/testnet/txns/`
pub fn init_dirs() -> TbResult<()> {
    fs::create_dir_all(config_dir()?)?;
    for network in ["mainnet", "testnet"] {
        fs::create_dir_all(data_dir()?.join(network).join("txns"))?;
    }
    Ok(())
}

/// Count existing subdirectories, used to sequence transaction folders
pub fn count_subdirs(dir: &Path) -> TbResult<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            count += 1;
        }
    }
    Ok(count)
}
