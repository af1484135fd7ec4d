//! Identity operation result types

/// Outcome of checking a password against the stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Authenticated,
    Rejected,
}

impl VerifyOutcome {
    pub fn is_authenticated(self) -> bool {
        self == VerifyOutcome::Authenticated
    }
}
