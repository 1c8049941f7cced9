//! HTTP server for the Land Registry Ledger (LRL).
//!
//! Exposes the full registry operation surface over REST, plus the
//! profile, document, and advisory collaborator boundaries. Caller
//! identity arrives in the `x-caller-address` header; the signing
//! wallet is an external collaborator, and the server treats the address
//! it presents as authenticated.
//!
//! Every failure maps to a distinct machine-readable `code` in the JSON
//! error envelope so the calling UI can branch (e.g. redirect to a
//! verification request instead of showing a permission error).

pub mod config;
pub mod dto;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::build_router;
pub use server::LrlServer;
pub use state::AppState;
