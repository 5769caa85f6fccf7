use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create permission_types table. Fixed ids, seeded below.
        manager
            .create_table(
                Table::create()
                    .table(PermissionTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PermissionTypes::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(PermissionTypes::Description))
                    .to_owned(),
            )
            .await?;

        // Create permissions table. No foreign key on TypeCode: the
        // reference check is done in the write path, not by the schema.
        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Permissions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Permissions::EmployeeFirstName))
                    .col(string(Permissions::EmployeeLastName))
                    .col(integer(Permissions::TypeCode))
                    .col(big_integer(Permissions::PermissionDate))
                    .to_owned(),
            )
            .await?;

        // Seed the reference set
        for (id, description) in [
            (1, "Sickness"),
            (2, "Errand"),
            (3, "Relocation"),
            (4, "Vacation"),
        ] {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(PermissionTypes::Table)
                        .columns([PermissionTypes::Id, PermissionTypes::Description])
                        .values_panic([id.into(), description.into()])
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PermissionTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
    EmployeeFirstName,
    EmployeeLastName,
    TypeCode,
    PermissionDate,
}

#[derive(DeriveIden)]
enum PermissionTypes {
    Table,
    Id,
    Description,
}
