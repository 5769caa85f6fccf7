use crate::entities;
use crate::errors::FurloughError;
use crate::settings::Database as DbCfg;
use sea_orm::{
    ActiveModelTrait, Database, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// Authoritative permission record, joined with its type description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub type_code: i32,
    /// Unix timestamp (seconds)
    pub permission_date: i64,
    pub type_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPermission {
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub type_code: i32,
    pub permission_date: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionType {
    pub id: i32,
    pub description: String,
}

fn to_permission(
    model: entities::permission::Model,
    permission_type: Option<entities::permission_type::Model>,
) -> Permission {
    Permission {
        id: model.id,
        employee_first_name: model.employee_first_name,
        employee_last_name: model.employee_last_name,
        type_code: model.type_code,
        permission_date: model.permission_date,
        type_description: permission_type.map(|t| t.description),
    }
}

pub async fn init(cfg: &DbCfg) -> Result<DatabaseConnection, FurloughError> {
    let db = Database::connect(&cfg.url).await?;
    Ok(db)
}

/// Insert a new permission row and return it with its assigned id.
pub async fn create_permission(
    db: &DatabaseConnection,
    input: &NewPermission,
) -> Result<entities::permission::Model, FurloughError> {
    let row = entities::permission::ActiveModel {
        id: NotSet,
        employee_first_name: Set(input.employee_first_name.clone()),
        employee_last_name: Set(input.employee_last_name.clone()),
        type_code: Set(input.type_code),
        permission_date: Set(input.permission_date),
    };

    let model = row.insert(db).await?;
    Ok(model)
}

/// Read a permission by id, joined with its type description.
pub async fn get_permission(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<Permission>, FurloughError> {
    let found = entities::Permission::find_by_id(id)
        .find_also_related(entities::PermissionType)
        .one(db)
        .await?;

    Ok(found.map(|(model, permission_type)| to_permission(model, permission_type)))
}

pub async fn list_permissions(db: &DatabaseConnection) -> Result<Vec<Permission>, FurloughError> {
    let rows = entities::Permission::find()
        .find_also_related(entities::PermissionType)
        .order_by_asc(entities::permission::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(model, permission_type)| to_permission(model, permission_type))
        .collect())
}

/// Persist a fully merged record. All fields are written.
pub async fn update_permission(
    db: &DatabaseConnection,
    record: &Permission,
) -> Result<entities::permission::Model, FurloughError> {
    let row = entities::permission::ActiveModel {
        id: Set(record.id),
        employee_first_name: Set(record.employee_first_name.clone()),
        employee_last_name: Set(record.employee_last_name.clone()),
        type_code: Set(record.type_code),
        permission_date: Set(record.permission_date),
    };

    let model = row.update(db).await?;
    Ok(model)
}

pub async fn delete_permission(db: &DatabaseConnection, id: i32) -> Result<bool, FurloughError> {
    let res = entities::Permission::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Reference check used by the write path before any mutation.
pub async fn permission_type_exists(
    db: &DatabaseConnection,
    type_code: i32,
) -> Result<bool, FurloughError> {
    let found = entities::PermissionType::find_by_id(type_code).one(db).await?;
    Ok(found.is_some())
}

pub async fn list_permission_types(
    db: &DatabaseConnection,
) -> Result<Vec<PermissionType>, FurloughError> {
    let rows = entities::PermissionType::find()
        .order_by_asc(entities::permission_type::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|model| PermissionType {
            id: model.id,
            description: model.description,
        })
        .collect())
}
