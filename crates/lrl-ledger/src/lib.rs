//! Ledger store for the Land Registry Ledger (LRL).
//!
//! This crate is the single source of truth for property and ownership
//! state. It provides:
//! - `LedgerReader` / `LedgerWriter` trait boundaries
//! - `InMemoryLedger` implementation for tests and embedding
//! - `JournalLedger`: a durable, crash-recoverable store backed by an
//!   append-only journal
//! - A built-in history index updated in the same critical section as the
//!   log append, so readers always see log and state move together
//! - `LedgerAuditor` cross-checking current state against the log
//!
//! Every state-changing operation performs all of its checks and all of
//! its mutations inside one write critical section: racing transfers on
//! the same property serialize, and exactly one wins.

pub mod audit;
pub mod error;
pub mod event;
pub mod journal;
pub mod memory;
mod state;
pub mod traits;

pub use audit::{AuditReport, LedgerAuditor, Violation, ViolationKind};
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use journal::{Journal, JournalLedger, SyncMode};
pub use memory::InMemoryLedger;
pub use traits::{LedgerReader, LedgerStore, LedgerWriter};
