//! Database repository layer for all domain entities.
//!
//! Repositories wrap SeaORM queries for one table (or a table and its children) and
//! return domain models. They are generic over `ConnectionTrait` so the same
//! repository runs against the pool or inside a transaction.

pub mod analytics;
pub mod audit_log;
pub mod cart;
pub mod faq;
pub mod game;
pub mod game_version;
pub mod library;
pub mod news;
pub mod order;
pub mod payment;
pub mod review;
pub mod support;
pub mod upload;
pub mod user;
pub mod user_follow;

#[cfg(test)]
mod test;
