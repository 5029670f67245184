use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::faq::{CreateFaqParam, Faq, UpdateFaqParam};

pub struct FaqRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FaqRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateFaqParam) -> Result<Faq, DbErr> {
        let now = Utc::now();

        let entity = entity::faq::ActiveModel {
            question: ActiveValue::Set(param.question),
            answer: ActiveValue::Set(param.answer),
            sort_order: ActiveValue::Set(param.sort_order),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Faq::from_entity(entity))
    }

    /// All live entries ordered by `sort_order`, ties broken by id.
    pub async fn get_all(&self) -> Result<Vec<Faq>, DbErr> {
        let entities = entity::prelude::Faq::find()
            .filter(entity::faq::Column::IsDeleted.eq(false))
            .order_by_asc(entity::faq::Column::SortOrder)
            .order_by_asc(entity::faq::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Faq::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Faq>, DbErr> {
        let entity = entity::prelude::Faq::find_by_id(id)
            .filter(entity::faq::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(Faq::from_entity))
    }

    pub async fn update(&self, id: i32, param: UpdateFaqParam) -> Result<Option<Faq>, DbErr> {
        let Some(entity) = entity::prelude::Faq::find_by_id(id)
            .filter(entity::faq::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::faq::ActiveModel = entity.into();
        if let Some(question) = param.question {
            active.question = ActiveValue::Set(question);
        }
        if let Some(answer) = param.answer {
            active.answer = ActiveValue::Set(answer);
        }
        if let Some(sort_order) = param.sort_order {
            active.sort_order = ActiveValue::Set(sort_order);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Faq::from_entity(entity)))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Faq::update_many()
            .filter(entity::faq::Column::Id.eq(id))
            .filter(entity::faq::Column::IsDeleted.eq(false))
            .col_expr(entity::faq::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::faq::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
