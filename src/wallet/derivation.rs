//! HD key derivation
//!
//! Walks the fixed Tulobyte BIP-44 path m/44'/202'/0'/0/0 over a BIP-39
//! seed to produce a secp256k1 key pair.
//!
//! SECURITY: private key material is zeroized when no longer needed.

use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::Network;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::str::FromStr;
use zeroize::Zeroizing;

use crate::error::{TbError, TbResult};
use crate::wallet::address;

/// Fixed derivation path; coin type 202 is reserved for Tulobyte
pub const DERIVATION_PATH: &str = "m/44'/202'/0'/0/0";

/// Minimum seed length accepted by the master-key step
pub const MIN_SEED_LEN: usize = 32;

/// A secp256k1 key pair with both public-key encodings exposed explicitly
///
/// Uncompressed (X‖Y) is the canonical display form and the address input;
/// compressed (parity prefix ‖ X) is kept for callers that need the short
/// form. Pick one deliberately, never by accident.
#[derive(Debug, Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Build a key pair from a validated secret key
    pub fn from_secret(secret: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);
        Self { secret, public }
    }

    /// Build a key pair from a hex-encoded private scalar
    ///
    /// Validation order matches the recovery flow: hex format, length
    /// (at least 64 hex characters / 32 bytes), then range 0 < d < N.
    pub fn from_private_hex(private_hex: &str) -> TbResult<Self> {
        let trimmed = private_hex.trim();

        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TbError::invalid_input(
                "Private key must be in hexadecimal format",
            ));
        }
        if trimmed.len() < 64 {
            return Err(TbError::invalid_private_key(
                "Private key must be at least 64 hexadecimal characters long",
            ));
        }

        let bytes = Zeroizing::new(hex::decode(trimmed)?);
        let scalar = if bytes.len() == 32 {
            &bytes[..]
        } else {
            // Longer inputs are only in range when the extra leading bytes
            // are zero; anything else exceeds the curve order.
            let (prefix, tail) = bytes.split_at(bytes.len() - 32);
            if prefix.iter().any(|&b| b != 0) {
                return Err(TbError::invalid_private_key(
                    "Invalid private key: key out of range",
                ));
            }
            tail
        };

        let secret = SecretKey::from_slice(scalar).map_err(|_| {
            TbError::invalid_private_key("Invalid private key: key out of range")
        })?;
        Ok(Self::from_secret(secret))
    }

    /// Hex encoding of the 32-byte private scalar, zero-padded
    pub fn private_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret.secret_bytes()))
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// Uncompressed encoding: 64 bytes X‖Y (no 0x04 tag)
    pub fn public_uncompressed(&self) -> [u8; 64] {
        let full = self.public.serialize_uncompressed();
        let mut out = [0u8; 64];
        out.copy_from_slice(&full[1..]);
        out
    }

    /// Compressed encoding: 33 bytes, 0x02/0x03 parity prefix then X
    pub fn public_compressed(&self) -> [u8; 33] {
        self.public.serialize()
    }

    /// Wallet address derived from the uncompressed public key
    pub fn address(&self) -> String {
        address::address_of(&self.public_uncompressed())
    }
}

/// Derive the wallet key pair from a seed along the fixed path
///
/// Deterministic: the same seed always yields the same pair. Any failed
/// derivation step aborts the whole operation; no partial key is returned.
pub fn derive_key_pair(seed: &[u8]) -> TbResult<KeyPair> {
    if seed.len() < MIN_SEED_LEN {
        return Err(TbError::invalid_seed(
            "Seed must be at least 32 bytes long",
        ));
    }

    let secp = Secp256k1::new();
    let master = Xpriv::new_master(Network::Bitcoin, seed)
        .map_err(|e| TbError::derivation_failure(format!("Failed to generate master key: {}", e)))?;

    let path = DerivationPath::from_str(DERIVATION_PATH)
        .map_err(|e| TbError::derivation_failure(format!("Bad derivation path: {}", e)))?;
    let child = master
        .derive_priv(&secp, &path)
        .map_err(|e| TbError::derivation_failure(format!("Failed to derive keys: {}", e)))?;

    // Re-validate the scalar range through the secp256k1 constructor so an
    // out-of-range child surfaces as InvalidPrivateKey, not a silent wrap.
    let secret = SecretKey::from_slice(&child.private_key.secret_bytes())
        .map_err(|_| TbError::invalid_private_key("Derived key out of range"))?;

    Ok(KeyPair::from_secret(secret))
}
