//! Migration to create the role-specific profile tables.
//!
//! `staff`, `teachers`, `students` and `parents` each hold at most one row per user
//! (unique `user_id`) and disappear with the user. Students and parents are linked
//! through `student_parents`.

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
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Staff::Id))
                    .col(uuid_ref(Staff::UserId).unique_key().to_owned())
                    .col(uuid_ref(Staff::InstitutionId))
                    .col(uuid_ref_null(Staff::DepartmentId))
                    .col(
                        ColumnDef::new(Staff::EmployeeNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::JobTitle).string().not_null())
                    .col(
                        ColumnDef::new(Staff::EmploymentType)
                            .string_len(32)
                            .not_null()
                            .default("full_time"),
                    )
                    .col(ColumnDef::new(Staff::HiredOn).date().null())
                    .col(ColumnDef::new(Staff::TerminatedOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_staff_user_id",
                        Staff::Table,
                        Staff::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_staff_institution_id",
                        Staff::Table,
                        Staff::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_staff_department_id",
                        Staff::Table,
                        Staff::DepartmentId,
                        Departments::Table,
                        Departments::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Teachers::Id))
                    .col(uuid_ref(Teachers::UserId).unique_key().to_owned())
                    .col(uuid_ref(Teachers::InstitutionId))
                    .col(uuid_ref_null(Teachers::DepartmentId))
                    .col(
                        ColumnDef::new(Teachers::EmployeeNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::Qualification).string().null())
                    .col(ColumnDef::new(Teachers::Specialization).string().null())
                    .col(ColumnDef::new(Teachers::HiredOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_teachers_user_id",
                        Teachers::Table,
                        Teachers::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_teachers_institution_id",
                        Teachers::Table,
                        Teachers::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_teachers_department_id",
                        Teachers::Table,
                        Teachers::DepartmentId,
                        Departments::Table,
                        Departments::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Students::Id))
                    .col(uuid_ref(Students::UserId).unique_key().to_owned())
                    .col(uuid_ref_null(Students::InstitutionId))
                    .col(
                        ColumnDef::new(Students::AdmissionNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::DateOfBirth).date().null())
                    .col(ColumnDef::new(Students::Gender).string_len(16).null())
                    .col(ColumnDef::new(Students::AdmittedOn).date().null())
                    .col(
                        ColumnDef::new(Students::Status)
                            .string_len(32)
                            .not_null()
                            .default("active"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_students_user_id",
                        Students::Table,
                        Students::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_students_institution_id",
                        Students::Table,
                        Students::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_students_institution_status",
                Students::Table,
                [Students::InstitutionId, Students::Status],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parents::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Parents::Id))
                    .col(uuid_ref(Parents::UserId).unique_key().to_owned())
                    .col(ColumnDef::new(Parents::Occupation).string().null())
                    .col(ColumnDef::new(Parents::Employer).string().null())
                    .col(ColumnDef::new(Parents::AlternatePhone).string().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_parents_user_id",
                        Parents::Table,
                        Parents::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentParents::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, StudentParents::Id))
                    .col(uuid_ref(StudentParents::StudentId))
                    .col(uuid_ref(StudentParents::ParentId))
                    .col(
                        ColumnDef::new(StudentParents::Relationship)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentParents::IsPrimaryContact)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_student_parents_student_id",
                        StudentParents::Table,
                        StudentParents::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_student_parents_parent_id",
                        StudentParents::Table,
                        StudentParents::ParentId,
                        Parents::Table,
                        Parents::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_student_parents_unique",
                StudentParents::Table,
                [StudentParents::StudentId, StudentParents::ParentId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &["student_parents", "parents", "students", "teachers", "staff"],
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
enum Departments {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    UserId,
    InstitutionId,
    DepartmentId,
    EmployeeNumber,
    JobTitle,
    EmploymentType,
    HiredOn,
    TerminatedOn,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
    UserId,
    InstitutionId,
    DepartmentId,
    EmployeeNumber,
    Qualification,
    Specialization,
    HiredOn,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    UserId,
    InstitutionId,
    AdmissionNumber,
    DateOfBirth,
    Gender,
    AdmittedOn,
    Status,
}

#[derive(DeriveIden)]
enum Parents {
    Table,
    Id,
    UserId,
    Occupation,
    Employer,
    AlternatePhone,
}

#[derive(DeriveIden)]
enum StudentParents {
    Table,
    Id,
    StudentId,
    ParentId,
    Relationship,
    IsPrimaryContact,
}
