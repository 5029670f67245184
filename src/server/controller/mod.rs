pub mod analytics;
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
