//! Transaction record and canonical signing payload
//!
//! The short-code field names are part of the on-disk format consumed by
//! downstream tooling and must be preserved exactly. Hash determinism
//! depends on a fixed key ordering, so both structs declare their fields
//! in lexicographic order and serde emits them in declaration order.

use serde::{Deserialize, Serialize};

/// Fee charged per serialized byte of the artifact
pub const FEE_PER_BYTE: u64 = 10;

/// Fixed-width fee placeholder used during the sizing pass
pub const FEE_PLACEHOLDER: &str = "0000000000";

/// The bytes that get hashed and signed
///
/// Carries the pre-signature fields only. `b` here is a reserved parity
/// flag, always 0, distinct from the batch flag on the final record.
/// Field order is lexicographic: a, b, d, n, r, s, t.
#[derive(Debug, Serialize)]
pub struct SigningPayload<'a> {
    pub a: &'a str,
    pub b: u8,
    pub d: &'a str,
    pub n: &'a str,
    pub r: &'a str,
    pub s: &'a str,
    pub t: &'a str,
}

impl<'a> SigningPayload<'a> {
    pub fn new(
        amount: &'a str,
        data: &'a str,
        nonce: &'a str,
        receiver: &'a str,
        sender: &'a str,
        timestamp: &'a str,
    ) -> Self {
        Self {
            a: amount,
            b: 0,
            d: data,
            n: nonce,
            r: receiver,
            s: sender,
            t: timestamp,
        }
    }
}

/// The signed transaction artifact persisted for later broadcast
///
/// Key meanings: `n` nonce, `s` sender, `r` receiver, `t` timestamp,
/// `a` amount, `b` batch flag ("0" hunter / "1" normal), `d` data,
/// `sg` hex signature, `f` fee (decimal string), `h` hex tx hash.
/// `h` is absent during the fee-sizing pass and present in the final
/// record; field order is lexicographic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    pub a: String,
    pub b: String,
    pub d: String,
    pub f: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub h: String,
    pub n: String,
    pub r: String,
    pub s: String,
    pub sg: String,
    pub t: String,
}

impl TransactionRecord {
    /// Serialized size in bytes of the compact JSON encoding
    pub fn serialized_len(&self) -> crate::error::TbResult<usize> {
        Ok(serde_json::to_vec(self)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keys_in_lexicographic_order() {
        let payload = SigningPayload::new("500", "hello", "0", "0xrecv", "0xsend", "1700000000");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"a":"500","b":0,"d":"hello","n":"0","r":"0xrecv","s":"0xsend","t":"1700000000"}"#
        );
    }

    fn sample_record() -> TransactionRecord {
        TransactionRecord {
            a: "500".into(),
            b: "1".into(),
            d: "memo".into(),
            f: FEE_PLACEHOLDER.into(),
            h: String::new(),
            n: "0".into(),
            r: "0xbd00d8fd55d733c2bc35cb50cca0c9a131d8bfb7".into(),
            s: "0xad00d8fd55d733c2bc35cb50cca0c9a131d8bfb7".into(),
            sg: "ab".repeat(65),
            t: "1700000000".into(),
        }
    }

    #[test]
    fn test_hash_omitted_while_empty() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("\"h\""));

        let mut finalized = record;
        finalized.h = "0xdeadbeef".into();
        let json = serde_json::to_string(&finalized).unwrap();
        assert!(json.contains("\"h\":\"0xdeadbeef\""));
    }

    #[test]
    fn test_record_keys_in_lexicographic_order() {
        let mut record = sample_record();
        record.h = "0xff".into();
        let json = serde_json::to_string(&record).unwrap();

        let positions: Vec<usize> = ["\"a\":", "\"b\":", "\"d\":", "\"f\":", "\"h\":", "\"n\":", "\"r\":", "\"s\":", "\"sg\":", "\"t\":"]
            .iter()
            .map(|k| json.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_round_trip() {
        let mut record = sample_record();
        record.h = "0xff".into();
        let json = serde_json::to_string(&record).unwrap();
        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_serialized_len_matches_encoding() {
        let record = sample_record();
        let len = record.serialized_len().unwrap();
        assert_eq!(len, serde_json::to_vec(&record).unwrap().len());
    }
}
