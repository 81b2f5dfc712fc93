//! Recovery phrase generation
//!
//! Draws one uniformly random index per word from the static English
//! wordlist using the operating system CSPRNG. The phrase is plain random
//! draws with no checksum structure, so any word sequence round-trips
//! through recovery.

use bip39::Language;
use rand::rngs::OsRng;
use rand::Rng;

/// Word counts accepted without falling back to the default
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Default phrase length when the requested count is out of range
pub const DEFAULT_WORD_COUNT: usize = 12;

/// Coerce a requested word count into the supported set
///
/// Anything outside {12, 15, 18, 21, 24} falls back to 12 words. This is a
/// documented default, not an error.
pub fn normalize_word_count(word_count: usize) -> usize {
    if VALID_WORD_COUNTS.contains(&word_count) {
        word_count
    } else {
        DEFAULT_WORD_COUNT
    }
}

/// Generate a random recovery phrase of the given length
///
/// A failed randomness read aborts the process inside the OS RNG; there is
/// no insecure fallback and no retry.
pub fn generate_mnemonic(word_count: usize) -> String {
    let wordlist = Language::English.word_list();
    let count = normalize_word_count(word_count);

    let mut rng = OsRng;
    let mut words = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.gen_range(0..wordlist.len());
        words.push(wordlist[index]);
    }

    words.join(" ")
}
