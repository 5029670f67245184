use crate::{
    model::order::OrderStatus,
    server::{data::order::OrderRepository, model::order::OrderItem},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod list_paginated;
mod transition;
