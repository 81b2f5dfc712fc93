//! Mnemonic-to-seed derivation
//!
//! PBKDF2 with HMAC-SHA512, 2048 iterations, 64-byte output. The salt is
//! the standard BIP-39 construction `"mnemonic" + passphrase`; with an
//! empty passphrase this matches wallets derived with the bare `"mnemonic"`
//! salt bit-for-bit.
//!
//! SECURITY: the seed and the passphrase-bearing salt are zeroized on drop.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// PBKDF2 iteration count
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed length in bytes
pub const SEED_LEN: usize = 64;

/// Derive a 64-byte seed from a mnemonic and optional passphrase
///
/// Pure and deterministic: the same inputs always produce the same seed.
/// The mnemonic is not recoverable from the seed.
pub fn derive_seed(mnemonic: &str, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
    let salt = Zeroizing::new(format!("mnemonic{}", passphrase));
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(
        mnemonic.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        seed.as_mut(),
    );
    seed
}
