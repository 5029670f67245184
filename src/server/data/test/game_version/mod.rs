use crate::server::data::game_version::GameVersionRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod latest;
