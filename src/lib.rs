//! Tulobyte Wallet Library
//!
//! Local, single-user wallet for the Tulobyte network.
//!
//! # Architecture
//!
//! This crate provides:
//! - **wallet**: Mnemonic generation, seed and HD key derivation, address
//!   encoding, and the persisted key store
//! - **tx**: Transfer preflight, canonical transaction records, signing
//! - **chain**: Balance and nonce oracle (placeholder pending a real node
//!   client)
//! - **config**: Explicit configuration passed into components
//! - **utils**: Structured logging with sensitive-data redaction
//!
//! # Security
//!
//! This crate uses `zeroize` to clear sensitive data from memory. Seeds
//! and private-key material are held in `Zeroizing` wrappers and zeroed
//! when dropped. The wallet file is written with owner-only permissions.
//!
//! # Example
//!
//! ```rust,ignore
//! use tulobyte::wallet::{create_wallet, FileWalletStore};
//!
//! let store = FileWalletStore::new("/tmp/wallet.tb");
//! let summary = create_wallet(&store, 12, "")?;
//! println!("Address: {}", summary.address);
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod tx;
pub mod utils;
pub mod wallet;

pub use chain::{AccountState, ChainQuery, PlaceholderNode};
pub use config::{BatchMode, Config, Network};
pub use error::{ErrorCode, TbError, TbResult};
pub use tx::{preflight, sign_transfer, TransactionRecord, TransferPlan};
pub use wallet::{
    create_wallet, recover_from_key, recover_from_phrase, wallet_info, FileWalletStore,
    KeyPair, WalletStore, WalletSummary,
};
