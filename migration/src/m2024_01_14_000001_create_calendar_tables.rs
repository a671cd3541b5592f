//! Migration to create school events, their participants and holidays.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, set_null, unique_index, updated_at, uuid_pk,
    uuid_ref, uuid_ref_null,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Events::Id))
                    .col(uuid_ref(Events::InstitutionId))
                    .col(uuid_ref_null(Events::OrganizerId))
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Location).string().null())
                    .col(
                        ColumnDef::new(Events::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::EndsAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Events::IsAllDay)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::Visibility)
                            .string_len(16)
                            .not_null()
                            .default("public"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_events_institution_id",
                        Events::Table,
                        Events::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_events_organizer_id",
                        Events::Table,
                        Events::OrganizerId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_events_institution_starts",
                Events::Table,
                [Events::InstitutionId, Events::StartsAt],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventParticipants::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, EventParticipants::Id))
                    .col(uuid_ref(EventParticipants::EventId))
                    .col(uuid_ref(EventParticipants::UserId))
                    .col(
                        ColumnDef::new(EventParticipants::Response)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_event_participants_event_id",
                        EventParticipants::Table,
                        EventParticipants::EventId,
                        Events::Table,
                        Events::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_event_participants_user_id",
                        EventParticipants::Table,
                        EventParticipants::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_event_participants_event_user",
                EventParticipants::Table,
                [EventParticipants::EventId, EventParticipants::UserId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Holidays::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Holidays::Id))
                    .col(uuid_ref(Holidays::InstitutionId))
                    .col(uuid_ref_null(Holidays::AcademicYearId))
                    .col(ColumnDef::new(Holidays::Name).string().not_null())
                    .col(ColumnDef::new(Holidays::StartsOn).date().not_null())
                    .col(ColumnDef::new(Holidays::EndsOn).date().not_null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_holidays_institution_id",
                        Holidays::Table,
                        Holidays::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_holidays_academic_year_id",
                        Holidays::Table,
                        Holidays::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["holidays", "event_participants", "events"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AcademicYears {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    InstitutionId,
    OrganizerId,
    Title,
    Description,
    Location,
    StartsAt,
    EndsAt,
    IsAllDay,
    Visibility,
}

#[derive(DeriveIden)]
enum EventParticipants {
    Table,
    Id,
    EventId,
    UserId,
    Response,
}

#[derive(DeriveIden)]
enum Holidays {
    Table,
    Id,
    InstitutionId,
    AcademicYearId,
    Name,
    StartsOn,
    EndsOn,
}
