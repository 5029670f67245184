//! SeaORM entity models for the Forja database.
//!
//! One module per table. Status columns are stored as lowercase strings and
//! interpreted by the server's domain models.

pub mod prelude;

pub mod analytics_event;
pub mod analytics_session;
pub mod audit_log;
pub mod cart;
pub mod cart_item;
pub mod faq;
pub mod game;
pub mod game_version;
pub mod library_entry;
pub mod news_article;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod review;
pub mod support_ticket;
pub mod ticket_message;
pub mod upload_chunk;
pub mod upload_session;
pub mod user;
pub mod user_follow;
