use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub developer_id: i32,
    pub title: String,
    pub short_description: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub genre: Option<String>,
    pub price_cents: i64,
    pub cover_image_key: Option<String>,
    pub is_published: bool,
    pub release_date: Option<DateTimeUtc>,
    pub is_deleted: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DeveloperId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Developer,
    #[sea_orm(has_many = "super::game_version::Entity")]
    GameVersion,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Developer.def()
    }
}

impl Related<super::game_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
