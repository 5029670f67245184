//! Cron jobs run alongside the API server.

pub mod upload_cleanup;
