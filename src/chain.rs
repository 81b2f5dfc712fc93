//! Chain query interface
//!
//! The signer needs the sender's balance and transaction count before it
//! will build a transfer. Where those numbers come from is someone else's
//! problem: the trait keeps the node dependency injectable and the rest
//! of the crate testable offline.

use crate::error::TbResult;

/// Account facts as reported by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
    pub balance: u64,
    pub tx_count: u64,
}

/// Balance and nonce oracle for a wallet address
///
/// Implementations report `Unavailable` when the node cannot be reached.
pub trait ChainQuery {
    fn account_state(&self, address: &str) -> TbResult<AccountState>;
}

/// Stand-in node until a real RPC client exists
///
/// Reports a fixed balance of 10000 and an empty transaction history for
/// every address. TODO: replace with an RPC-backed implementation once
/// node endpoints are published.
pub struct PlaceholderNode;

impl ChainQuery for PlaceholderNode {
    fn account_state(&self, _address: &str) -> TbResult<AccountState> {
        Ok(AccountState {
            balance: 10_000,
            tx_count: 0,
        })
    }
}
