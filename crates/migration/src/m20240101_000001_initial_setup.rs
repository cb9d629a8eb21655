use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create sessions table
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sessions::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create scan_records table
        manager
            .create_table(
                Table::create()
                    .table(ScanRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScanRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScanRecords::DeviceId).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Brand).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Model).string().not_null())
                    .col(ColumnDef::new(ScanRecords::ModelSearch).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Capacity).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Color).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Grade).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Status).string().not_null())
                    .col(ColumnDef::new(ScanRecords::Quantity).integer().default(1))
                    .col(
                        ColumnDef::new(ScanRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ScanRecords::SessionId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scan_record_session")
                            .from(ScanRecords::Table, ScanRecords::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A device is scanned at most once per session
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_scan_records_device_session")
                    .table(ScanRecords::Table)
                    .col(ScanRecords::DeviceId)
                    .col(ScanRecords::SessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Summaries read a session newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_records_session_time")
                    .table(ScanRecords::Table)
                    .col(ScanRecords::SessionId)
                    .col(ScanRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_records_created_at")
                    .table(ScanRecords::Table)
                    .col(ScanRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScanRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    Date, // business date
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScanRecords {
    Table,
    Id,
    DeviceId,
    Brand,
    Model,
    ModelSearch,
    Capacity,
    Color,
    Grade,
    Status,
    Quantity,
    CreatedAt,
    SessionId,
}
