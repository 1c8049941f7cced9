//! Off-chain KYC profile store boundary for the Land Registry Ledger.
//!
//! Profiles are keyed by wallet address with at most one profile per
//! address. Submission has upsert semantics: re-submitting under an
//! existing key overwrites every stored field except the key itself.
//! The ledger never consults this store; KYC is a policy concern layered
//! above it (see `lrl-registry`).

pub mod error;
pub mod memory;
pub mod traits;

pub use error::ProfileError;
pub use memory::InMemoryProfileStore;
pub use traits::ProfileStore;
