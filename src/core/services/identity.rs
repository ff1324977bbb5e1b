//! Identity resolution - log in with either a handle or an address
//!
//! The caller hands over whatever the member typed into the login form. The
//! resolver tries each lookup strategy in order, stops at the first hit and
//! then checks the secret. The result is either the account or nothing: an
//! unknown identifier and a wrong secret look exactly the same from outside.

use log::debug;

use crate::core::models::{Account, AccountField};
use crate::core::ports::{AccountRepository, SecretVerifier, StoreError};

/// Resolves a login identifier and secret to an account
pub struct IdentityResolver<'a> {
    accounts: &'a dyn AccountRepository,
    verifier: &'a dyn SecretVerifier,
    strategies: Vec<AccountField>,
    allow_inactive: bool,
}

impl std::fmt::Debug for IdentityResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("strategies", &self.strategies)
            .field("allow_inactive", &self.allow_inactive)
            .finish_non_exhaustive()
    }
}

impl<'a> IdentityResolver<'a> {
    /// Handle first, then address
    pub const DEFAULT_STRATEGIES: [AccountField; 2] = [AccountField::Handle, AccountField::Address];

    /// Create a resolver with the default strategies
    ///
    /// Inactive accounts resolve like any other; `allow_inactive(false)`
    /// turns on the stricter rule.
    #[must_use]
    pub fn new(accounts: &'a dyn AccountRepository, verifier: &'a dyn SecretVerifier) -> Self {
        Self {
            accounts,
            verifier,
            strategies: Self::DEFAULT_STRATEGIES.to_vec(),
            allow_inactive: true,
        }
    }

    /// Replace the ordered list of lookup strategies
    #[must_use]
    pub fn with_strategies(mut self, strategies: impl Into<Vec<AccountField>>) -> Self {
        self.strategies = strategies.into();
        self
    }

    /// Whether inactive accounts may log in
    #[must_use]
    pub const fn allow_inactive(mut self, allow: bool) -> Self {
        self.allow_inactive = allow;
        self
    }

    /// Resolve `identifier` and `secret` to an account
    ///
    /// Returns `Ok(None)` for an unknown identifier, a wrong secret and (in
    /// strict mode) an inactive account alike. Only a store fault is an error.
    pub fn resolve(&self, identifier: &str, secret: &str) -> Result<Option<Account>, StoreError> {
        let Some(account) = self.lookup(identifier)? else {
            debug!("login rejected for {identifier:?}");
            self.verifier.equalize(secret);
            return Ok(None);
        };

        if !self.verifier.verify(&account, secret) {
            debug!("login rejected for {identifier:?}");
            return Ok(None);
        }

        if !account.active && !self.allow_inactive {
            debug!("login rejected for {identifier:?}");
            return Ok(None);
        }

        debug!("login accepted for account {}", account.id);
        Ok(Some(account))
    }

    fn lookup(&self, identifier: &str) -> Result<Option<Account>, StoreError> {
        for field in &self.strategies {
            if let Some(account) = self.accounts.find_by_field(*field, identifier)? {
                return Ok(Some(account));
            }
        }
        Ok(None)
    }
}
