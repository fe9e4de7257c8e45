//! License key generation.

use rand::Rng;

const KEY_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 8;

/// Generate an opaque 16-character license key from `[0-9a-z]`, built as two
/// concatenated random 8-character fragments.
///
/// This uses a non-cryptographic RNG: keys are opaque identifiers with
/// negligible collision probability, NOT secrets. Do not use them for
/// anything that requires unpredictability.
pub fn generate_license_key() -> String {
    let mut rng = rand::thread_rng();

    let mut fragment = || -> String {
        (0..FRAGMENT_LEN)
            .map(|_| KEY_CHARSET[rng.gen_range(0..KEY_CHARSET.len())] as char)
            .collect()
    };

    format!("{}{}", fragment(), fragment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let key = generate_license_key();
        assert_eq!(key.len(), 16);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys: std::collections::HashSet<String> =
            (0..100).map(|_| generate_license_key()).collect();
        assert_eq!(keys.len(), 100);
    }
}
