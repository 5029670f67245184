use crate::server::{
    data::analytics::AnalyticsRepository,
    model::analytics::{EventSearchParam, TrackEventParam},
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod events;
mod sessions;
