use crate::server::{data::news::NewsRepository, model::news::CreateNewsParam};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_published_paginated;
mod publish;
