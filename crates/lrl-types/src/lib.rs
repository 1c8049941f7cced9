//! Foundation types for the Land Registry Ledger (LRL).
//!
//! This crate provides the identity, record, and profile types used
//! throughout the LRL system. Every other LRL crate depends on `lrl-types`.
//!
//! # Key Types
//!
//! - [`Address`] — 20-byte account address, hex-parsed and case-insensitive
//! - [`PropertyId`] — Monotonically assigned unique property identifier
//! - [`Property`] — A registered land parcel and its current state
//! - [`TxRef`] — Opaque unique reference to a committed transfer
//! - [`TransactionRecord`] — One entry in the append-only transfer log
//! - [`KycProfile`] — Off-chain identity profile keyed by wallet address

pub mod address;
pub mod error;
pub mod profile;
pub mod property;
pub mod txref;

pub use address::Address;
pub use error::TypeError;
pub use profile::KycProfile;
pub use property::{Property, PropertyId, TransactionRecord};
pub use txref::TxRef;
