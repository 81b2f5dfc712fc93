//! Transfer preflight checks
//!
//! Everything that can reject a transfer without touching key material
//! happens here, before any signing attempt: recipient format, amount
//! sanity, balance, and the nonce for the new transaction.

use crate::chain::ChainQuery;
use crate::error::{TbError, TbResult};
use crate::wallet::address;

/// Inputs the signer needs once preflight has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
    pub nonce: u64,
}

/// Validate a transfer request against the sender's account state
pub fn preflight(
    chain: &dyn ChainQuery,
    sender: &str,
    recipient: &str,
    amount: u64,
) -> TbResult<TransferPlan> {
    if !address::is_valid_address_format(recipient) {
        return Err(TbError::invalid_address("Invalid recipient address"));
    }
    if address::addresses_match(recipient, sender) {
        return Err(TbError::invalid_input(
            "Recipient address matches the sender",
        ));
    }
    if amount == 0 {
        return Err(TbError::invalid_input("Transfer amount must be positive"));
    }

    let state = chain.account_state(sender)?;
    if amount > state.balance {
        return Err(TbError::insufficient_funds(format!(
            "Transfer amount {} exceeds available balance {}",
            amount, state.balance
        )));
    }

    Ok(TransferPlan {
        sender: sender.to_string(),
        recipient: recipient.to_string(),
        amount,
        nonce: nonce_for(state.tx_count),
    })
}

/// Nonce for the next transaction given the account's transaction count
///
/// Legacy rule: an empty history yields nonce 0, otherwise tx_count - 1.
pub fn nonce_for(tx_count: u64) -> u64 {
    if tx_count == 0 {
        0
    } else {
        tx_count - 1
    }
}
