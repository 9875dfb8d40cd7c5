//! Create reservations table
//!
//! The single persisted entity: guest reservation requests with contact
//! fields, the four-value status column, reschedule proposal slots and
//! cancellation bookkeeping.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::GuestId).string())
                    .col(ColumnDef::new(Reservations::GuestUsername).string())
                    .col(ColumnDef::new(Reservations::FirstName).string())
                    .col(ColumnDef::new(Reservations::LastName).string())
                    .col(ColumnDef::new(Reservations::Email).string())
                    .col(ColumnDef::new(Reservations::MobileNumber).string())
                    .col(ColumnDef::new(Reservations::Date).date().not_null())
                    .col(ColumnDef::new(Reservations::Time).time().not_null())
                    .col(ColumnDef::new(Reservations::Guests).integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::SpecialRequest)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Reservations::ProposedDate).date())
                    .col(ColumnDef::new(Reservations::ProposedTime).time())
                    .col(
                        ColumnDef::new(Reservations::GuestConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::CancellationFeeDue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reservations::CancelledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_guest")
                    .table(Reservations::Table)
                    .col(Reservations::GuestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    GuestId,
    GuestUsername,
    FirstName,
    LastName,
    Email,
    MobileNumber,
    Date,
    Time,
    Guests,
    SpecialRequest,
    Status,
    ProposedDate,
    ProposedTime,
    GuestConfirmed,
    CancellationFeeDue,
    CancelledAt,
    CreatedAt,
}
