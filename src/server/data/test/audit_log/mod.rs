use crate::server::{
    data::audit_log::AuditLogRepository,
    model::audit::{AuditEntry, AuditLogSearchParam},
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod search_paginated;
