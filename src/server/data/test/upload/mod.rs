use crate::{model::upload::UploadStatus, server::data::upload::UploadRepository};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_stale;
mod record_chunk;
