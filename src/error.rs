//! Unified error types for the Tulobyte wallet
//!
//! All errors flow through this module for consistent handling and
//! reporting. None of these are retried automatically: each aborts the
//! current user-initiated operation with a clear message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all wallet operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TbError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl TbError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    pub fn invalid_seed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSeed, msg)
    }

    pub fn invalid_private_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPrivateKey, msg)
    }

    pub fn derivation_failure(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DerivationFailure, msg)
    }

    pub fn signing_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SigningFailed, msg)
    }

    pub fn verification_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SignatureVerificationFailed, msg)
    }

    pub fn key_not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::KeyNotFound, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, msg)
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, msg)
    }

    pub fn insufficient_funds(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientFunds, msg)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for TbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for TbError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    InvalidAddress,
    InvalidMnemonic,

    // Key material errors
    InvalidSeed,
    InvalidPrivateKey,
    DerivationFailure,

    // Signing errors
    SigningFailed,
    SignatureVerificationFailed,

    // Wallet store / filesystem
    KeyNotFound,
    IoError,
    ConfigError,

    // Chain query
    Unavailable,
    InsufficientFunds,

    // Parse errors
    ParseError,
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for wallet operations
pub type TbResult<T> = Result<T, TbError>;

// Conversions from common error types

impl From<serde_json::Error> for TbError {
    fn from(e: serde_json::Error) -> Self {
        TbError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for TbError {
    fn from(e: hex::FromHexError) -> Self {
        TbError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for TbError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            TbError::new(ErrorCode::KeyNotFound, e.to_string())
        } else {
            TbError::new(ErrorCode::IoError, e.to_string())
        }
    }
}

impl From<bitcoin::bip32::Error> for TbError {
    fn from(e: bitcoin::bip32::Error) -> Self {
        TbError::new(ErrorCode::DerivationFailure, format!("BIP32 error: {}", e))
    }
}

impl From<secp256k1::Error> for TbError {
    fn from(e: secp256k1::Error) -> Self {
        TbError::new(ErrorCode::InvalidPrivateKey, format!("Secp256k1 error: {}", e))
    }
}
