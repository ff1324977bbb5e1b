//! Account model
//!
//! An account is a site member as stored in `auth_user`. This crate only ever
//! reads accounts; registration and profile edits happen elsewhere.

use serde::Serialize;

/// A site member who can log in
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Primary key
    pub id: i64,

    /// Unique handle (`auth_user.username`)
    pub handle: String,

    /// Unique contact address (`auth_user.email`)
    pub address: String,

    /// Encoded secret, e.g. `pbkdf2_sha256$870000$salt$hash`
    #[serde(skip)]
    pub secret_hash: String,

    /// Whether the account may log in
    pub active: bool,
}

impl Account {
    /// Create an active account
    #[must_use]
    pub fn new(
        id: i64,
        handle: impl Into<String>,
        address: impl Into<String>,
        secret_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            handle: handle.into(),
            address: address.into(),
            secret_hash: secret_hash.into(),
            active: true,
        }
    }

    /// Same account with the active flag set to `active`
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

// The encoded secret stays out of logs and panic messages.
impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("address", &self.address)
            .field("secret_hash", &"<redacted>")
            .field("active", &self.active)
            .finish()
    }
}

/// A unique account field an identifier can be matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    /// The login handle
    Handle,
    /// The contact (email) address
    Address,
}

impl AccountField {
    /// Column holding this field in `auth_user`
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Handle => "username",
            Self::Address => "email",
        }
    }
}

impl std::fmt::Display for AccountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handle => write!(f, "handle"),
            Self::Address => write!(f, "address"),
        }
    }
}
