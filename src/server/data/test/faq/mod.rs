use crate::server::{data::faq::FaqRepository, model::faq::UpdateFaqParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all;
