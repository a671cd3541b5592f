//! # Student Repository
//!
//! Enrollment and soft-delete operations for student profiles.

use chrono::{NaiveDate, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::student::{ActiveModel, Column, Model};
use crate::models::{Student, User};
use crate::soft_delete::{TrashedScope, find_scoped};

const MAX_ADMISSION_NUMBER_LEN: usize = 32;
pub const ACTIVE_STATUS: &str = "active";

/// Request data for enrolling a user as a student
#[derive(Debug, Clone)]
pub struct EnrollStudentRequest {
    pub user_id: Uuid,
    pub institution_id: Option<Uuid>,
    pub admission_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub admitted_on: Option<NaiveDate>,
}

pub struct StudentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StudentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the student profile for a live user.
    ///
    /// A user holds at most one profile and admission numbers are unique; both
    /// are enforced by the schema and reported as [`RepositoryError::Conflict`].
    pub async fn enroll(&self, request: EnrollStudentRequest) -> RepositoryResult<Model> {
        let admission_number = request.admission_number.trim().to_string();
        if admission_number.is_empty() {
            return Err(RepositoryError::validation_error(
                "admission number cannot be empty",
            ));
        }
        if admission_number.len() > MAX_ADMISSION_NUMBER_LEN {
            return Err(RepositoryError::validation_error(format!(
                "admission number cannot exceed {MAX_ADMISSION_NUMBER_LEN} characters"
            )));
        }

        let user_exists = find_scoped::<User>(TrashedScope::WithoutTrashed)
            .filter(crate::models::user::Column::Id.eq(request.user_id))
            .one(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading user"))?
            .is_some();
        if !user_exists {
            return Err(RepositoryError::not_found("user", request.user_id));
        }

        let now = Utc::now().fixed_offset();
        let student = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(request.user_id),
            institution_id: Set(request.institution_id),
            admission_number: Set(admission_number),
            date_of_birth: Set(request.date_of_birth),
            gender: Set(request.gender),
            admitted_on: Set(request.admitted_on),
            status: Set(ACTIVE_STATUS.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let created = student
            .insert(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "enrolling student"))?;

        tracing::info!(
            student_id = %created.id,
            user_id = %created.user_id,
            admission_number = %created.admission_number,
            "Enrolled student"
        );
        Ok(created)
    }

    pub async fn find_by_admission_number(
        &self,
        admission_number: &str,
        scope: TrashedScope,
    ) -> RepositoryResult<Option<Model>> {
        find_scoped::<Student>(scope)
            .filter(Column::AdmissionNumber.eq(admission_number.trim()))
            .one(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading student"))
    }

    /// Live students with `active` status, ordered by admission number
    pub async fn list_active(&self) -> RepositoryResult<Vec<Model>> {
        find_scoped::<Student>(TrashedScope::WithoutTrashed)
            .filter(Column::Status.eq(ACTIVE_STATUS))
            .order_by_asc(Column::AdmissionNumber)
            .all(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "listing students"))
    }

    pub async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()> {
        let now = Utc::now().fixed_offset();
        let result = Student::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "soft deleting student"))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("student", id));
        }
        tracing::info!(student_id = %id, "Soft deleted student");
        Ok(())
    }

    pub async fn restore(&self, id: Uuid) -> RepositoryResult<()> {
        let result = Student::update_many()
            .col_expr(Column::DeletedAt, Expr::value(None::<DateTimeWithTimeZone>))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_not_null())
            .exec(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "restoring student"))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("student", id));
        }
        tracing::info!(student_id = %id, "Restored student");
        Ok(())
    }
}
