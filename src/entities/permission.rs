use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub type_code: i32,
    /// Unix timestamp (seconds)
    pub permission_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::permission_type::Entity",
        from = "Column::TypeCode",
        to = "super::permission_type::Column::Id"
    )]
    PermissionType,
}

impl Related<super::permission_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
