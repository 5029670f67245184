//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Ownership rules, state transitions and request validation that
//!   needs the database
//! - **Orchestration**: Coordinating multiple repository calls with storage and email
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Checkout, payment settlement and upload completion run
//!   inside one database transaction

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod cart;
pub mod faq;
pub mod game;
pub mod health;
pub mod image;
pub mod library;
pub mod news;
pub mod notifier;
pub mod order;
pub mod payment;
pub mod review;
pub mod support;
pub mod upload;
pub mod user;

#[cfg(test)]
mod test;
