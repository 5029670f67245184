use crate::server::data::library::LibraryRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod add_play_time;
mod grant;
mod revoke_by_order;
