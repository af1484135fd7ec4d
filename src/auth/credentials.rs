//! Presented credentials
//!
//! Username/password pairs as they arrive with a request, and decoding of
//! the HTTP Basic `Authorization` header that carries them.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Username and plaintext password presented by a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decode `Basic <base64(username:password)>`.
pub fn parse_basic_authorization(header: &str) -> Option<Credentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials::new(username, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn decodes_basic_header() {
        let creds = parse_basic_authorization(&basic("alice:s3:cret")).unwrap();
        assert_eq!(creds, Credentials::new("alice", "s3:cret"));

        let creds = parse_basic_authorization(&basic("bob:")).unwrap();
        assert_eq!(creds.password, "");
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(parse_basic_authorization("Bearer abc.def").is_none());
        assert!(parse_basic_authorization("Basic !!!").is_none());
        assert!(parse_basic_authorization(&basic("no-colon")).is_none());
        assert!(parse_basic_authorization("Basic").is_none());
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
