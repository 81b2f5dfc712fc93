//! Wallet module
//!
//! Mnemonic generation, seed derivation, HD key derivation, address
//! encoding, and the persisted wallet store. The flows here converge on
//! one shape: produce a usable key pair, persist its secret, and report
//! the derived public information.

pub mod address;
pub mod derivation;
pub mod mnemonic;
pub mod seed;
pub mod store;

pub use address::{address_of, addresses_match, is_valid_address_format};
pub use derivation::{derive_key_pair, KeyPair, DERIVATION_PATH};
pub use mnemonic::generate_mnemonic;
pub use seed::derive_seed;
pub use store::{FileWalletStore, WalletStore};

use zeroize::Zeroizing;

use crate::error::TbResult;

/// Public outcome of a create or recover flow
///
/// `mnemonic` is only present when a phrase exists: key-based recovery
/// cannot reconstruct one, and that irreversibility is part of the
/// user-facing guarantee.
pub struct WalletSummary {
    pub mnemonic: Option<String>,
    pub private_hex: Zeroizing<String>,
    pub public_hex: String,
    pub address: String,
}

/// Create a new wallet: fresh phrase, derived keys, persisted secret
pub fn create_wallet(
    store: &dyn WalletStore,
    word_count: usize,
    passphrase: &str,
) -> TbResult<WalletSummary> {
    let phrase = mnemonic::generate_mnemonic(word_count);
    let seed = seed::derive_seed(&phrase, passphrase);
    let pair = derivation::derive_key_pair(seed.as_ref())?;

    let private_hex = pair.private_hex();
    store.write(&private_hex)?;

    Ok(WalletSummary {
        mnemonic: Some(phrase),
        public_hex: hex::encode(pair.public_uncompressed()),
        address: pair.address(),
        private_hex,
    })
}

/// Recover a wallet from a mnemonic phrase (plus optional passphrase)
pub fn recover_from_phrase(
    store: &dyn WalletStore,
    phrase: &str,
    passphrase: &str,
) -> TbResult<WalletSummary> {
    let seed = seed::derive_seed(phrase, passphrase);
    let pair = derivation::derive_key_pair(seed.as_ref())?;

    let private_hex = pair.private_hex();
    store.write(&private_hex)?;

    Ok(WalletSummary {
        mnemonic: Some(phrase.to_string()),
        public_hex: hex::encode(pair.public_uncompressed()),
        address: pair.address(),
        private_hex,
    })
}

/// Recover a wallet directly from a hex-encoded private key
pub fn recover_from_key(store: &dyn WalletStore, private_hex: &str) -> TbResult<WalletSummary> {
    let pair = derivation::KeyPair::from_private_hex(private_hex)?;

    let normalized = pair.private_hex();
    store.write(&normalized)?;

    Ok(WalletSummary {
        mnemonic: None,
        public_hex: hex::encode(pair.public_uncompressed()),
        address: pair.address(),
        private_hex: normalized,
    })
}

/// Recompute public key and address from the stored secret
pub fn wallet_info(store: &dyn WalletStore) -> TbResult<WalletSummary> {
    let stored = store.read()?;
    let pair = derivation::KeyPair::from_private_hex(&stored)?;

    Ok(WalletSummary {
        mnemonic: None,
        public_hex: hex::encode(pair.public_uncompressed()),
        address: pair.address(),
        private_hex: pair.private_hex(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory store for flow tests
    struct MemStore {
        secret: RefCell<Option<String>>,
    }

    impl MemStore {
        fn new() -> Self {
            Self {
                secret: RefCell::new(None),
            }
        }
    }

    impl WalletStore for MemStore {
        fn read(&self) -> TbResult<Zeroizing<String>> {
            self.secret
                .borrow()
                .clone()
                .map(Zeroizing::new)
                .ok_or_else(|| crate::error::TbError::key_not_found("no wallet"))
        }

        fn write(&self, private_hex: &str) -> TbResult<()> {
            *self.secret.borrow_mut() = Some(private_hex.to_string());
            Ok(())
        }
    }

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_create_persists_and_reports() {
        let store = MemStore::new();
        let summary = create_wallet(&store, 12, "").unwrap();

        assert_eq!(summary.mnemonic.as_ref().unwrap().split_whitespace().count(), 12);
        assert!(is_valid_address_format(&summary.address));
        assert_eq!(summary.public_hex.len(), 128);
        assert_eq!(&*store.read().unwrap(), &*summary.private_hex);
    }

    #[test]
    fn test_recover_from_phrase_matches_known_wallet() {
        let store = MemStore::new();
        let summary = recover_from_phrase(&store, TEST_MNEMONIC, "").unwrap();
        assert_eq!(summary.address, "0xad00d8fd55d733c2bc35cb50cca0c9a131d8bfb7");
        assert_eq!(
            &*summary.private_hex,
            "79fde2303c03824bdbbeb05703847bd34d602f67246a4d8e6831efd07d3a06b5"
        );
    }

    #[test]
    fn test_recover_from_key_matches_phrase_recovery() {
        let by_phrase = recover_from_phrase(&MemStore::new(), TEST_MNEMONIC, "").unwrap();

        let store = MemStore::new();
        let by_key = recover_from_key(&store, &by_phrase.private_hex).unwrap();

        assert!(by_key.mnemonic.is_none());
        assert_eq!(by_key.address, by_phrase.address);
        assert_eq!(by_key.public_hex, by_phrase.public_hex);
    }

    #[test]
    fn test_wallet_info_round_trips_through_store() {
        let store = MemStore::new();
        let created = recover_from_phrase(&store, TEST_MNEMONIC, "").unwrap();

        let info = wallet_info(&store).unwrap();
        assert_eq!(info.address, created.address);
        assert_eq!(info.public_hex, created.public_hex);
    }

    #[test]
    fn test_wallet_info_without_wallet() {
        // WalletSummary has no Debug impl; it holds private_hex
        let err = wallet_info(&MemStore::new()).map(|_| ()).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::KeyNotFound);
    }

    #[test]
    fn test_address_stable_under_repeated_recovery() {
        let first = recover_from_phrase(&MemStore::new(), TEST_MNEMONIC, "").unwrap();
        let second = recover_from_phrase(&MemStore::new(), TEST_MNEMONIC, "").unwrap();
        assert_eq!(first.address, second.address);
    }
}
