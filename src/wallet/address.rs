//! Address encoding and format validation
//!
//! A Tulobyte address is the last 20 bytes of the Keccak-256 hash of the
//! 64-byte uncompressed public key, hex-encoded with a `0x` prefix.
//! Address comparison is case-insensitive.

use tiny_keccak::{Hasher, Keccak};

/// Address length including the `0x` prefix
pub const ADDRESS_LEN: usize = 42;

/// Compute Keccak-256
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Derive the address from a 64-byte uncompressed public key (X‖Y)
pub fn address_of(public_uncompressed: &[u8; 64]) -> String {
    let hash = keccak256(public_uncompressed);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Check address format: `0x` prefix + exactly 40 hex characters
pub fn is_valid_address_format(address: &str) -> bool {
    address.len() == ADDRESS_LEN
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Case-insensitive address equality
pub fn addresses_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
