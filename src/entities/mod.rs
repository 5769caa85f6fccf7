pub mod permission;
pub mod permission_type;

pub use permission::Entity as Permission;
pub use permission_type::Entity as PermissionType;
