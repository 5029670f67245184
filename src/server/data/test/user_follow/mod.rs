use crate::server::data::user_follow::UserFollowRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod followers;
