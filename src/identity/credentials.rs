//! Credential hashing
//!
//! Passwords are stored as the lowercase hex SHA-224 digest of their UTF-8
//! bytes, with no salt and no trailing newline. This is the format existing
//! `.user` files are written in.

use sha2::{Digest, Sha224};
use subtle::ConstantTimeEq;

/// Hash a plaintext password into its stored form
pub fn hash_password(password: &str) -> Vec<u8> {
    hex::encode(Sha224::digest(password.as_bytes())).into_bytes()
}

/// Compare a presented password against stored credential bytes
pub fn matches(password: &str, stored: &[u8]) -> bool {
    hash_password(password).ct_eq(stored).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha224() {
        assert_eq!(
            hash_password(""),
            b"d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f".to_vec()
        );
        assert_eq!(hash_password("secret").len(), 56);
    }

    #[test]
    fn matches_exact_bytes_only() {
        let stored = hash_password("hunter2");
        assert!(matches("hunter2", &stored));
        assert!(!matches("hunter3", &stored));

        let mut with_newline = stored.clone();
        with_newline.push(b'\n');
        assert!(!matches("hunter2", &with_newline));
        assert!(!matches("hunter2", b""));
    }
}
