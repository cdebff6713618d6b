use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A chat widget conversation, one row per session.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: String,
    pub interface: String, // chatbot
    pub site: String,      // act-farm
    pub history_json: String, // [{role, content}, ...]
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
