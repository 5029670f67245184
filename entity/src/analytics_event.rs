use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "analytics_event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub session_id: Option<i32>,
    pub user_id: Option<i32>,
    pub event_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub payload: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::analytics_session::Entity",
        from = "Column::SessionId",
        to = "super::analytics_session::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    AnalyticsSession,
}

impl Related<super::analytics_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalyticsSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
