//! Secret verifier port
//!
//! Defines how a supplied plaintext is checked against an account's stored hash.

use crate::core::models::Account;

/// One-way secret verification
#[cfg_attr(test, mockall::automock)]
pub trait SecretVerifier: Send + Sync {
    /// Whether `plaintext` matches the account's stored secret
    fn verify(&self, account: &Account, plaintext: &str) -> bool;

    /// Spend roughly the cost of one verification and discard the result
    ///
    /// Called when no account matched, so that an unknown identifier takes
    /// about as long as a wrong secret.
    fn equalize(&self, _plaintext: &str) {}
}
