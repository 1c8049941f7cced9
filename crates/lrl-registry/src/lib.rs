//! Registry service for the Land Registry Ledger (LRL).
//!
//! This crate is the only component permitted to mutate the ledger store.
//! It enforces the registry's authorization and invariant rules:
//!
//! - Any address may register a property; the caller becomes its owner.
//! - Only the configured admin address may verify a property.
//! - Only the current owner may transfer a property, only once it is
//!   verified, and never to the zero address or to itself.
//! - Every successful transfer commits the ownership change and its audit
//!   record atomically.
//!
//! Failures are surfaced as distinct [`RegistryError`] variants so a
//! caller can react to each outcome differently. An optional
//! [`TransferPolicy`] adds application-level restrictions (such as a KYC
//! requirement) above the ledger invariants; it can tighten, never bypass.

pub mod config;
pub mod error;
pub mod policy;
pub mod service;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use policy::{AllowAll, PolicyDecision, ProfileKycPolicy, TransferPolicy};
pub use service::{Registry, RegistryStats};
