//! Core domain logic for brightminds
//!
//! This module contains the login check and the media reconciliation logic.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Account, `ContentRecord`, `DiscrepancyReport`)
//! - `services/` - Business logic orchestration
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
