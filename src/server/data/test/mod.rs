mod analytics;
mod audit_log;
mod cart;
mod faq;
mod game;
mod game_version;
mod library;
mod news;
mod order;
mod payment;
mod review;
mod support;
mod upload;
mod user;
mod user_follow;
