use crate::{model::payment::PaymentStatus, server::data::payment::PaymentRepository};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod lifecycle;
