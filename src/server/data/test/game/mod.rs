use crate::server::{data::game::GameRepository, model::game::GameSearchParam};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod search_published;
mod soft_delete;
