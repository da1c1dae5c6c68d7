use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Interns::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Interns::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Interns::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Interns::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Interns::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Interns::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Interns::HireDate).date().not_null())
                    .col(ColumnDef::new(Interns::Salary).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Interns::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Interns::AddressId).uuid().null())
                    .col(ColumnDef::new(Interns::MentorId).uuid().null())
                    .col(ColumnDef::new(Interns::InternshipEndDate).date().not_null())
                    .col(
                        ColumnDef::new(Interns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Interns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interns_address_id")
                            .from(Interns::Table, Interns::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interns_mentor_id")
                            .from(Interns::Table, Interns::MentorId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Interns::Table)
                    .col(Interns::MentorId)
                    .name("idx_interns_mentor_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Interns::Table)
                    .col(Interns::LastName)
                    .col(Interns::FirstName)
                    .name("idx_interns_last_name_first_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Interns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Interns {
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
    MentorId,
    InternshipEndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Addresses {
    Table,
    Id,
}

#[derive(Iden)]
enum Managers {
    Table,
    Id,
}
