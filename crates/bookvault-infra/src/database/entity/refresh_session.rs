//! Refresh-session entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub expires_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for bookvault_core::domain::RefreshSession {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            token: model.token,
            expires_at: model.expires_at.into(),
        }
    }
}

impl From<bookvault_core::domain::RefreshSession> for ActiveModel {
    fn from(session: bookvault_core::domain::RefreshSession) -> Self {
        Self {
            id: NotSet,
            user_id: Set(session.user_id),
            token: Set(session.token),
            expires_at: Set(session.expires_at.into()),
        }
    }
}
