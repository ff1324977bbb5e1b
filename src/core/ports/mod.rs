//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (the site database, the media directory,
//! the password hasher).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations, so services can be exercised with in-memory doubles.

mod account_repo;
mod asset_storage;
mod content_repo;
mod error;
mod secret_verifier;

pub use account_repo::AccountRepository;
pub use asset_storage::AssetStorage;
pub use content_repo::{ContentRepository, RewriteOutcome};
pub use error::{RewriteError, StorageError, StoreError};
pub use secret_verifier::SecretVerifier;

#[cfg(test)]
pub use account_repo::MockAccountRepository;
#[cfg(test)]
pub use asset_storage::MockAssetStorage;
#[cfg(test)]
pub use secret_verifier::MockSecretVerifier;
