//! Forja: a digital game storefront.
//!
//! The crate always exposes the shared API DTOs (`model`), the HTTP retry helper
//! (`retry`) and release version ordering (`version`) so the launcher can reuse them.
//! The API server lives behind the `server` feature.

pub mod model;
pub mod retry;
pub mod version;

#[cfg(feature = "server")]
pub mod server;
