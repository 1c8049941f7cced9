//! Derived history index for the Land Registry Ledger (LRL).
//!
//! The transaction log is the source of truth; this crate maintains the
//! read-side structure that answers filtered history queries without a
//! full log scan:
//!
//! - [`HistoryIndex`] — per-property, per-address, and per-reference
//!   buckets of log positions, maintained incrementally on append and
//!   rebuildable by replaying the log from empty state. Rebuild and
//!   incremental maintenance always converge on identical contents.

pub mod error;
pub mod index;

pub use error::IndexError;
pub use index::HistoryIndex;
