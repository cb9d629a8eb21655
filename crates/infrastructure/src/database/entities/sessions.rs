use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: DateTimeWithTimeZone, // business date
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scan_records::Entity")]
    ScanRecords,
}

impl Related<super::scan_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScanRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
