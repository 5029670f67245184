use crate::{
    model::support::{TicketPriority, TicketStatus},
    server::{
        data::support::{SupportTicketRepository, TicketMessageRepository},
        model::support::{CreateTicketParam, TicketSearchParam},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod assign;
mod messages;
mod search_paginated;
