//! Random alias generation.
//!
//! Produces candidate aliases only. Whether a candidate is free is decided by
//! the registry when the record is written.

use rand::Rng;
use std::sync::LazyLock;

/// Inclusive character ranges that make up the alias alphabet.
const RANGES: [(u8, u8); 3] = [(b'0', b'9'), (b'A', b'Z'), (b'a', b'z')];

/// `0-9A-Za-z`, 62 characters. Both ends of every range are included.
pub static ALPHABET: LazyLock<Vec<u8>> = LazyLock::new(|| {
    RANGES
        .iter()
        .flat_map(|&(first, last)| first..=last)
        .collect()
});

/// Generates a random alias of exactly `length` characters.
///
/// Every character is drawn uniformly from [`ALPHABET`]. The function keeps no
/// state between calls; `length == 0` yields an empty string.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(6);
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}
