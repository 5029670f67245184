//! Forja launcher: keeps purchased games installed and up to date, and runs them.
//!
//! - **Client** (`client`) - Authenticated calls to the Forja API with retries
//! - **Manifest** (`manifest`) - `installed.json` record of what is on disk
//! - **Install** (`install`) - Verified install, update and uninstall
//! - **Launch** (`launch`) - Runs an installed game and reports play time

pub mod client;
pub mod config;
pub mod error;
pub mod install;
pub mod launch;
pub mod manifest;
