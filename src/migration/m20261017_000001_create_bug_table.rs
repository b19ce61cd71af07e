use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;
use sea_query::Alias;
use crate::entity::bug::{Column, Entity};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(bugs_table(manager.get_database_backend()))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entity).to_owned())
            .await
    }
}

/// Free-text columns are `text` so no length limit applies beyond the
/// validator's. Timestamps keep microseconds on MySQL, where a bare
/// `timestamp` truncates to whole seconds.
pub(crate) fn bugs_table(backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Entity)
        .if_not_exists()
        .col(ColumnDef::new(Column::Id).string_len(36).not_null().primary_key())
        .col(ColumnDef::new(Column::Title).string().not_null())
        .col(ColumnDef::new(Column::Description).text().not_null())
        .col(ColumnDef::new(Column::Reporter).text().not_null())
        .col(ColumnDef::new(Column::Assignee).text().null())
        .col(ColumnDef::new(Column::Severity).string_len(16).not_null())
        .col(ColumnDef::new(Column::Status).string_len(16).not_null())
        .col(timestamp_column(backend, Column::CreatedAt))
        .col(timestamp_column(backend, Column::UpdatedAt))
        .to_owned()
}

fn timestamp_column(backend: DatabaseBackend, column: Column) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match backend {
        DatabaseBackend::MySql => def.custom(Alias::new("timestamp(6)")),
        _ => def.timestamp_with_time_zone(),
    };
    def.not_null();
    def
}
