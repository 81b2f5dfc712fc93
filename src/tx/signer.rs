//! Transaction signing
//!
//! Builds the canonical payload, hashes it with Keccak-256, signs with
//! recoverable ECDSA over secp256k1, and proves the signature recovers to
//! the expected sender before the record is accepted. A transfer either
//! produces a complete signed record or nothing.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, Secp256k1, SecretKey};

use crate::config::BatchMode;
use crate::error::{TbError, TbResult};
use crate::tx::record::{SigningPayload, TransactionRecord, FEE_PER_BYTE, FEE_PLACEHOLDER};
use crate::tx::validate::TransferPlan;
use crate::wallet::address;
use crate::wallet::derivation::KeyPair;
use crate::wallet::store::WalletStore;
use crate::{log_debug, log_info};

/// Signature length: 32-byte R, 32-byte S, 1-byte recovery id
pub const SIGNATURE_LEN: usize = 65;

/// Keccak-256 of the canonical payload encoding
pub fn tx_hash(payload: &SigningPayload) -> TbResult<[u8; 32]> {
    let encoded = serde_json::to_vec(payload)?;
    Ok(address::keccak256(&encoded))
}

/// Sign a 32-byte hash, returning R‖S‖V with V the raw recovery id
pub fn sign_hash(hash: &[u8; 32], secret: &SecretKey) -> [u8; SIGNATURE_LEN] {
    let secp = Secp256k1::new();
    let message = Message::from_digest(*hash);
    let (recovery_id, compact) = secp
        .sign_ecdsa_recoverable(&message, secret)
        .serialize_compact();

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..64].copy_from_slice(&compact);
    signature[64] = recovery_id.to_i32() as u8;
    signature
}

/// Recover the signer's address from a hash and a 65-byte signature
pub fn recover_signer(hash: &[u8; 32], signature: &[u8]) -> TbResult<String> {
    if signature.len() != SIGNATURE_LEN {
        return Err(TbError::invalid_input(format!(
            "Invalid signature length: {}",
            signature.len()
        )));
    }

    let recovery_id = RecoveryId::from_i32(signature[64] as i32)
        .map_err(|_| TbError::invalid_input("Invalid signature recovery id"))?;
    let recoverable = RecoverableSignature::from_compact(&signature[..64], recovery_id)
        .map_err(|_| TbError::invalid_input("Malformed signature"))?;

    let secp = Secp256k1::new();
    let message = Message::from_digest(*hash);
    let public = secp
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| TbError::verification_failed("Signature does not recover to a valid key"))?;

    let full = public.serialize_uncompressed();
    let mut xy = [0u8; 64];
    xy.copy_from_slice(&full[1..]);
    Ok(address::address_of(&xy))
}

/// Sign a validated transfer and assemble the final transaction record
///
/// The timestamp is taken fresh at signing time. The fee is measured over
/// the artifact serialized with a fixed-width fee placeholder and no hash
/// field, then the final record is assembled with the real fee and hash.
pub fn sign_transfer(
    store: &dyn WalletStore,
    plan: &TransferPlan,
    data: &str,
    batch: BatchMode,
) -> TbResult<TransactionRecord> {
    let stored = store.read()?;
    let pair = KeyPair::from_private_hex(&stored)?;

    let amount = plan.amount.to_string();
    let nonce = plan.nonce.to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let payload = SigningPayload::new(
        &amount,
        data,
        &nonce,
        &plan.recipient,
        &plan.sender,
        &timestamp,
    );

    let hash = tx_hash(&payload)?;
    let signature = sign_hash(&hash, pair.secret_key());
    log_debug!("signer", "Transaction hash computed", tx_hash = hex::encode(hash));

    let recovered = recover_signer(&hash, &signature)?;
    if !address::addresses_match(&recovered, &plan.sender) {
        return Err(TbError::verification_failed(
            "Recovered signer does not match the wallet address",
        ));
    }

    let mut record = TransactionRecord {
        a: amount,
        b: batch.flag().to_string(),
        d: data.to_string(),
        f: FEE_PLACEHOLDER.to_string(),
        h: String::new(),
        n: nonce,
        r: plan.recipient.clone(),
        s: plan.sender.clone(),
        sg: hex::encode(signature),
        t: timestamp,
    };

    let fee = record.serialized_len()? as u64 * FEE_PER_BYTE;
    record.f = fee.to_string();
    record.h = format!("0x{}", hex::encode(hash));

    log_info!(
        "signer",
        "Transaction signed",
        tx_hash = record.h,
        nonce = record.n,
        fee = record.f,
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::PlaceholderNode;
    use crate::error::ErrorCode;
    use crate::tx::validate::preflight;
    use crate::wallet::seed::derive_seed;
    use crate::wallet::{derive_key_pair, WalletStore};
    use std::cell::RefCell;
    use zeroize::Zeroizing;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const RECIPIENT: &str = "0xbd00d8fd55d733c2bc35cb50cca0c9a131d8bfb7";

    struct MemStore(RefCell<Option<String>>);

    impl WalletStore for MemStore {
        fn read(&self) -> TbResult<Zeroizing<String>> {
            self.0
                .borrow()
                .clone()
                .map(Zeroizing::new)
                .ok_or_else(|| TbError::key_not_found("no wallet"))
        }

        fn write(&self, private_hex: &str) -> TbResult<()> {
            *self.0.borrow_mut() = Some(private_hex.to_string());
            Ok(())
        }
    }

    fn test_pair() -> KeyPair {
        let seed = derive_seed(TEST_MNEMONIC, "");
        derive_key_pair(seed.as_ref()).unwrap()
    }

    fn test_store() -> MemStore {
        MemStore(RefCell::new(Some(test_pair().private_hex().to_string())))
    }

    fn test_plan(amount: u64) -> TransferPlan {
        preflight(&PlaceholderNode, &test_pair().address(), RECIPIENT, amount).unwrap()
    }

    #[test]
    fn test_hash_is_deterministic_for_fixed_payload() {
        let payload = SigningPayload::new("500", "memo", "0", RECIPIENT, "0xsender", "1700000000");
        let a = tx_hash(&payload).unwrap();
        let b = tx_hash(&payload).unwrap();
        assert_eq!(a, b);

        let other = SigningPayload::new("501", "memo", "0", RECIPIENT, "0xsender", "1700000000");
        assert_ne!(a, tx_hash(&other).unwrap());
    }

    #[test]
    fn test_sign_then_recover_round_trip() {
        let pair = test_pair();
        let hash = address::keccak256(b"round trip");
        let signature = sign_hash(&hash, pair.secret_key());

        assert_eq!(signature.len(), SIGNATURE_LEN);
        assert!(signature[64] == 0 || signature[64] == 1);

        let recovered = recover_signer(&hash, &signature).unwrap();
        assert!(address::addresses_match(&recovered, &pair.address()));
    }

    #[test]
    fn test_corrupted_signature_does_not_recover_signer() {
        let pair = test_pair();
        let hash = address::keccak256(b"corruption");
        let mut signature = sign_hash(&hash, pair.secret_key());
        signature[10] ^= 0xff;

        match recover_signer(&hash, &signature) {
            Ok(recovered) => assert!(!address::addresses_match(&recovered, &pair.address())),
            Err(err) => assert_eq!(err.code, ErrorCode::SignatureVerificationFailed),
        }
    }

    #[test]
    fn test_wrong_length_signature_rejected() {
        let hash = address::keccak256(b"short");
        let err = recover_signer(&hash, &[0u8; 64]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_sign_transfer_produces_complete_record() {
        let store = test_store();
        let record = sign_transfer(&store, &test_plan(500), "memo", BatchMode::Normal).unwrap();

        assert_eq!(record.a, "500");
        assert_eq!(record.b, "1");
        assert_eq!(record.d, "memo");
        assert_eq!(record.n, "0");
        assert_eq!(record.r, RECIPIENT);
        assert_eq!(record.sg.len(), SIGNATURE_LEN * 2);
        assert!(record.h.starts_with("0x"));
        assert_eq!(record.h.len(), 66);
        assert!(record.f.parse::<u64>().unwrap() > 0);
    }

    #[test]
    fn test_fee_measures_placeholder_sized_artifact() {
        let store = test_store();
        let record = sign_transfer(&store, &test_plan(500), "memo", BatchMode::Normal).unwrap();

        let mut sizing = record.clone();
        sizing.f = FEE_PLACEHOLDER.to_string();
        sizing.h = String::new();
        let expected = sizing.serialized_len().unwrap() as u64 * FEE_PER_BYTE;
        assert_eq!(record.f, expected.to_string());
    }

    #[test]
    fn test_fee_grows_with_data_length() {
        let store = test_store();
        let short = sign_transfer(&store, &test_plan(500), "a", BatchMode::Normal).unwrap();
        let long = sign_transfer(&store, &test_plan(500), &"a".repeat(100), BatchMode::Normal)
            .unwrap();
        assert!(
            long.f.parse::<u64>().unwrap() > short.f.parse::<u64>().unwrap()
        );
    }

    #[test]
    fn test_batch_flag_lands_in_record() {
        let store = test_store();
        let hunter = sign_transfer(&store, &test_plan(500), "", BatchMode::Hunter).unwrap();
        assert_eq!(hunter.b, "0");
    }

    #[test]
    fn test_missing_wallet_aborts_signing() {
        let store = MemStore(RefCell::new(None));
        let err = sign_transfer(&store, &test_plan(500), "", BatchMode::Normal).unwrap_err();
        assert_eq!(err.code, ErrorCode::KeyNotFound);
    }

    #[test]
    fn test_signature_recovers_to_payload_sender() {
        let store = test_store();
        let record = sign_transfer(&store, &test_plan(500), "memo", BatchMode::Normal).unwrap();

        let payload = SigningPayload::new(
            &record.a, &record.d, &record.n, &record.r, &record.s, &record.t,
        );
        let hash = tx_hash(&payload).unwrap();
        assert_eq!(format!("0x{}", hex::encode(hash)), record.h);

        let signature = hex::decode(&record.sg).unwrap();
        let recovered = recover_signer(&hash, &signature).unwrap();
        assert!(address::addresses_match(&recovered, &record.s));
    }
}
