//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types carry validated
//! request data from controllers into services.

pub mod analytics;
pub mod audit;
pub mod cart;
pub mod faq;
pub mod game;
pub mod library;
pub mod news;
pub mod order;
pub mod payment;
pub mod review;
pub mod support;
pub mod upload;
pub mod user;

use sea_orm::DbErr;

use crate::model::api::{total_pages, PageDto};

/// One page of domain models plus the numbers needed to navigate the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    /// Converts every item with `f` and attaches the page count.
    pub fn into_dto<U>(self, f: impl FnMut(T) -> U) -> PageDto<U> {
        PageDto {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: total_pages(self.total, self.per_page),
        }
    }
}

/// Parses a status column stored as a lowercase string.
pub(crate) fn parse_status<T>(value: &str) -> Result<T, DbErr>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse::<T>().map_err(DbErr::Type)
}
