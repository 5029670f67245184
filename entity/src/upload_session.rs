use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "upload_session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: i32,
    pub game_id: i32,
    pub version: String,
    pub file_name: String,
    pub total_chunks: i32,
    pub total_size: i64,
    pub uploaded_chunks: i32,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Game,
    #[sea_orm(has_many = "super::upload_chunk::Entity")]
    UploadChunk,
}

impl Related<super::upload_chunk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadChunk.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
