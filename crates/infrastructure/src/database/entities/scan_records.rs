use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scan_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub device_id: String, // unique together with session_id
    pub brand: String,
    pub model: String,
    pub model_search: String, // lowercased model for filtering
    pub capacity: String,
    pub color: String,
    pub grade: String,
    pub status: String,
    pub quantity: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub session_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Session,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
