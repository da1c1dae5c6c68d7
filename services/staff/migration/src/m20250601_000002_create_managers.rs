use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Managers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Managers::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Managers::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Managers::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Managers::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Managers::HireDate).date().not_null())
                    .col(ColumnDef::new(Managers::Salary).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Managers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Managers::AddressId).uuid().null())
                    .col(ColumnDef::new(Managers::Department).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Managers::HasCompanyCard)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Managers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Managers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_managers_address_id")
                            .from(Managers::Table, Managers::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Managers::Table)
                    .col(Managers::LastName)
                    .col(Managers::FirstName)
                    .name("idx_managers_last_name_first_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Managers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Managers {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    HireDate,
    Salary,
    IsActive,
    AddressId,
    Department,
    HasCompanyCard,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Addresses {
    Table,
    Id,
}
