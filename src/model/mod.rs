//! API data transfer objects shared by the server and the launcher.
//!
//! Everything here compiles without the `server` feature so the launcher can
//! deserialize the same shapes the API produces.

pub mod analytics;
pub mod api;
pub mod audit;
pub mod auth;
pub mod cart;
pub mod faq;
pub mod game;
pub mod health;
pub mod library;
pub mod news;
pub mod order;
pub mod payment;
pub mod review;
pub mod support;
pub mod upload;
pub mod user;
pub mod validation;
