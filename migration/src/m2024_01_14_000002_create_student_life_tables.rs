//! Migration to create clubs, club memberships and disciplinary incidents.

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
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Clubs::Id))
                    .col(uuid_ref(Clubs::InstitutionId))
                    .col(uuid_ref_null(Clubs::AdvisorId))
                    .col(ColumnDef::new(Clubs::Name).string().not_null())
                    .col(ColumnDef::new(Clubs::Description).text().null())
                    .col(ColumnDef::new(Clubs::MeetingSchedule).string().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_clubs_institution_id",
                        Clubs::Table,
                        Clubs::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_clubs_advisor_id",
                        Clubs::Table,
                        Clubs::AdvisorId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClubMemberships::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ClubMemberships::Id))
                    .col(uuid_ref(ClubMemberships::ClubId))
                    .col(uuid_ref(ClubMemberships::StudentId))
                    .col(
                        ColumnDef::new(ClubMemberships::Role)
                            .string_len(32)
                            .not_null()
                            .default("member"),
                    )
                    .col(ColumnDef::new(ClubMemberships::JoinedOn).date().not_null())
                    .col(ColumnDef::new(ClubMemberships::LeftOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_club_memberships_club_id",
                        ClubMemberships::Table,
                        ClubMemberships::ClubId,
                        Clubs::Table,
                        Clubs::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_club_memberships_student_id",
                        ClubMemberships::Table,
                        ClubMemberships::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_club_memberships_club_student",
                ClubMemberships::Table,
                [ClubMemberships::ClubId, ClubMemberships::StudentId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DisciplinaryIncidents::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, DisciplinaryIncidents::Id))
                    .col(uuid_ref(DisciplinaryIncidents::StudentId))
                    .col(uuid_ref_null(DisciplinaryIncidents::ReportedBy))
                    .col(
                        ColumnDef::new(DisciplinaryIncidents::OccurredOn)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DisciplinaryIncidents::Category)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DisciplinaryIncidents::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DisciplinaryIncidents::ActionTaken).text().null())
                    .col(
                        ColumnDef::new(DisciplinaryIncidents::ParentNotified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_disciplinary_incidents_student_id",
                        DisciplinaryIncidents::Table,
                        DisciplinaryIncidents::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_disciplinary_incidents_reported_by",
                        DisciplinaryIncidents::Table,
                        DisciplinaryIncidents::ReportedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_disciplinary_incidents_student_occurred",
                DisciplinaryIncidents::Table,
                [
                    DisciplinaryIncidents::StudentId,
                    DisciplinaryIncidents::OccurredOn,
                ],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &["disciplinary_incidents", "club_memberships", "clubs"],
        )
        .await
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
enum Teachers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
    InstitutionId,
    AdvisorId,
    Name,
    Description,
    MeetingSchedule,
}

#[derive(DeriveIden)]
enum ClubMemberships {
    Table,
    Id,
    ClubId,
    StudentId,
    Role,
    JoinedOn,
    LeftOn,
}

#[derive(DeriveIden)]
enum DisciplinaryIncidents {
    Table,
    Id,
    StudentId,
    ReportedBy,
    OccurredOn,
    Category,
    Description,
    ActionTaken,
    ParentNotified,
}
