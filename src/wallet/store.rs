//! Wallet store
//!
//! Sole long-lived owner of private key material: a hex-encoded scalar in
//! a single file with owner-only permissions. Everything else borrows the
//! secret for the duration of one operation.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::error::{TbError, TbResult};

/// Read/write access to the persisted wallet secret
pub trait WalletStore {
    /// Read the hex-encoded private scalar; absence is `KeyNotFound`
    fn read(&self) -> TbResult<Zeroizing<String>>;

    /// Persist the hex-encoded private scalar with restrictive permissions
    fn write(&self, private_hex: &str) -> TbResult<()>;
}

/// File-backed wallet store at a configured path
pub struct FileWalletStore {
    path: PathBuf,
}

impl FileWalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WalletStore for FileWalletStore {
    fn read(&self) -> TbResult<Zeroizing<String>> {
        if !self.path.exists() {
            return Err(TbError::key_not_found(
                "Wallet doesn't exist or file removed",
            ));
        }
        let data = fs::read_to_string(&self.path)
            .map_err(|e| TbError::io_error(format!("Can't read wallet file: {}", e)))?;
        Ok(Zeroizing::new(data.trim().to_string()))
    }

    fn write(&self, private_hex: &str) -> TbResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TbError::io_error(format!("Failed to create directory: {}", e)))?;
        }
        fs::write(&self.path, private_hex)
            .map_err(|e| TbError::io_error(format!("Failed to write private key: {}", e)))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| TbError::io_error(format!("Failed to set permissions: {}", e)))?;
        }

        Ok(())
    }
}
