use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "analytics_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    pub platform: String,
    pub app_version: Option<String>,
    pub started_at: DateTimeUtc,
    pub ended_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::analytics_event::Entity")]
    AnalyticsEvent,
}

impl Related<super::analytics_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalyticsEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
