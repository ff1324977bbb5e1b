//! Business logic services
//!
//! Orchestration logic that operates on domain models through the port
//! traits. Services never touch the database or the filesystem directly.
//!
//! - [`identity`] - Resolve a login identifier and secret to an account
//! - [`reconciler`] - Find asset references with no file behind them
//! - [`remediation`] - Point broken references at a placeholder copy

pub mod identity;
pub mod reconciler;
pub mod remediation;

pub use identity::IdentityResolver;
pub use reconciler::Reconciler;
pub use remediation::Remediator;
