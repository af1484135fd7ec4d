//! Authentication gate
//!
//! The seam between request credentials and the identity store. Any
//! implementation must answer the same way for unknown users and wrong
//! passwords.

use log::{debug, warn};

use crate::auth::credentials::Credentials;
use crate::error::IdentityError;
use crate::identity::{IdentityHandle, IdentityStore};

/// Given presented credentials, yields an identity handle or rejects.
pub trait AuthenticationGate: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<IdentityHandle, IdentityError>;
}

/// Checks the password against the identity's stored credential file
#[derive(Debug, Clone)]
pub struct PasswordGate {
    store: IdentityStore,
}

impl PasswordGate {
    pub fn new(store: IdentityStore) -> Self {
        Self { store }
    }
}

impl AuthenticationGate for PasswordGate {
    fn authenticate(&self, credentials: &Credentials) -> Result<IdentityHandle, IdentityError> {
        if !self
            .store
            .verify(&credentials.username, &credentials.password)
            .is_authenticated()
        {
            warn!("Authentication failed for user {:?}", credentials.username);
            return Err(IdentityError::Unauthenticated);
        }

        // The directory can vanish between verify and resolve
        let handle = self
            .store
            .resolve(&credentials.username)
            .map_err(|_| IdentityError::Unauthenticated)?;
        debug!("Authenticated user {}", handle.name());
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_valid_credentials() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::with_root(dir.path());
        store.provision("alice", Some("alice123")).unwrap();

        let gate = PasswordGate::new(store);
        let handle = gate
            .authenticate(&Credentials::new("alice", "alice123"))
            .unwrap();
        assert_eq!(handle.name(), "alice");
    }

    #[test]
    fn unknown_user_and_wrong_password_fail_alike() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::with_root(dir.path());
        store.provision("alice", Some("alice123")).unwrap();
        let gate = PasswordGate::new(store);

        let wrong = gate.authenticate(&Credentials::new("alice", "nope"));
        let unknown = gate.authenticate(&Credentials::new("mallory", "alice123"));
        assert!(matches!(wrong, Err(IdentityError::Unauthenticated)));
        assert!(matches!(unknown, Err(IdentityError::Unauthenticated)));
    }
}
