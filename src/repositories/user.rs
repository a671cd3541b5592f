//! # User Repository
//!
//! CRUD and soft-delete operations for users, plus role assignment through the
//! polymorphic `model_has_roles` pivot.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::model_has_role::{self, USER_MODEL_TYPE};
use crate::models::user::{ActiveModel, Column, Model};
use crate::models::{ModelHasRole, Role, User, role};
use crate::soft_delete::{TrashedScope, find_scoped};

const MAX_NAME_LEN: usize = 255;
const DEFAULT_LOCALE: &str = "en";

/// Request data for creating a user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// Already-hashed password
    pub password_hash: String,
    pub phone: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

/// Repository for user database operations
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new user. The email is trimmed and lowercased before storage.
    ///
    /// Returns [`RepositoryError::Conflict`] when the email is already taken,
    /// including by a soft-deleted user.
    pub async fn create(&self, request: CreateUserRequest) -> RepositoryResult<Model> {
        let name = request.name.trim().to_string();
        let email = normalize_email(&request.email);
        validate_name(&name)?;
        validate_email(&email)?;
        if request.password_hash.is_empty() {
            return Err(RepositoryError::validation_error(
                "password hash cannot be empty",
            ));
        }

        let now = Utc::now().fixed_offset();
        let user = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            email_verified_at: Set(None),
            password: Set(request.password_hash),
            phone: Set(request.phone),
            avatar_url: Set(None),
            status: Set("active".to_string()),
            last_login_at: Set(None),
            remember_token: Set(None),
            locale: Set(request.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string())),
            timezone: Set(request.timezone),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let created = user
            .insert(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "creating user"))?;

        tracing::info!(user_id = %created.id, "Created user");
        Ok(created)
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        scope: TrashedScope,
    ) -> RepositoryResult<Option<Model>> {
        let user = find_scoped::<User>(scope)
            .filter(Column::Id.eq(id))
            .one(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading user"))?;
        Ok(user)
    }

    pub async fn find_by_email(
        &self,
        email: &str,
        scope: TrashedScope,
    ) -> RepositoryResult<Option<Model>> {
        let user = find_scoped::<User>(scope)
            .filter(Column::Email.eq(normalize_email(email)))
            .one(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading user by email"))?;
        Ok(user)
    }

    /// List users ordered by name
    pub async fn list(&self, scope: TrashedScope) -> RepositoryResult<Vec<Model>> {
        let users = find_scoped::<User>(scope)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Email)
            .all(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "listing users"))?;
        Ok(users)
    }

    /// Mark a live user as deleted. Trashed or unknown users yield `NotFound`.
    pub async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()> {
        let now = Utc::now().fixed_offset();
        let result = User::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "soft deleting user"))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("user", id));
        }
        tracing::info!(user_id = %id, "Soft deleted user");
        Ok(())
    }

    /// Bring a soft-deleted user back. Live or unknown users yield `NotFound`.
    pub async fn restore(&self, id: Uuid) -> RepositoryResult<()> {
        let result = User::update_many()
            .col_expr(Column::DeletedAt, Expr::value(None::<DateTimeWithTimeZone>))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_not_null())
            .exec(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "restoring user"))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("user", id));
        }
        tracing::info!(user_id = %id, "Restored user");
        Ok(())
    }

    /// Permanently remove a user, live or trashed.
    ///
    /// Profile rows go with it through their cascading foreign keys. Role
    /// assignments are polymorphic and have no foreign key, so they are removed
    /// here in the same transaction.
    pub async fn force_delete(&self, id: Uuid) -> RepositoryResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::from_db(e, "starting transaction"))?;

        ModelHasRole::delete_many()
            .filter(model_has_role::Column::ModelId.eq(id))
            .filter(model_has_role::Column::ModelType.eq(USER_MODEL_TYPE))
            .exec(&txn)
            .await
            .map_err(|e| RepositoryError::from_db(e, "removing role assignments"))?;

        let result = User::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RepositoryError::from_db(e, "force deleting user"))?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back.
            return Err(RepositoryError::not_found("user", id));
        }

        txn.commit()
            .await
            .map_err(|e| RepositoryError::from_db(e, "committing force delete"))?;

        tracing::info!(user_id = %id, "Force deleted user");
        Ok(())
    }

    /// Grant the named role to a user.
    ///
    /// Returns `true` when the role was newly assigned and `false` when the user
    /// already had it.
    pub async fn assign_role(&self, user_id: Uuid, role_name: &str) -> RepositoryResult<bool> {
        if self.find_by_id(user_id, TrashedScope::WithoutTrashed).await?.is_none() {
            return Err(RepositoryError::not_found("user", user_id));
        }

        let role = find_scoped::<Role>(TrashedScope::WithoutTrashed)
            .filter(role::Column::Name.eq(role_name))
            .one(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading role"))?
            .ok_or_else(|| RepositoryError::not_found("role", role_name))?;

        let assignment = model_has_role::ActiveModel {
            role_id: Set(role.id),
            model_id: Set(user_id),
            model_type: Set(USER_MODEL_TYPE.to_string()),
        };

        let inserted = ModelHasRole::insert(assignment)
            .on_conflict(
                OnConflict::columns([
                    model_has_role::Column::RoleId,
                    model_has_role::Column::ModelId,
                    model_has_role::Column::ModelType,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "assigning role"))?;

        tracing::debug!(user_id = %user_id, role = role_name, inserted, "Assigned role");
        Ok(inserted > 0)
    }

    /// Names of the live roles held by a user, sorted
    pub async fn role_names(&self, user_id: Uuid) -> RepositoryResult<Vec<String>> {
        let names = find_scoped::<Role>(TrashedScope::WithoutTrashed)
            .join(JoinType::InnerJoin, role::Relation::ModelHasRoles.def())
            .filter(model_has_role::Column::ModelId.eq(user_id))
            .filter(model_has_role::Column::ModelType.eq(USER_MODEL_TYPE))
            .select_only()
            .column(role::Column::Name)
            .order_by_asc(role::Column::Name)
            .into_tuple::<String>()
            .all(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading user roles"))?;
        Ok(names)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_name(name: &str) -> RepositoryResult<()> {
    if name.is_empty() {
        return Err(RepositoryError::validation_error("name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(RepositoryError::validation_error(format!(
            "name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> RepositoryResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid || email.len() > MAX_NAME_LEN {
        return Err(RepositoryError::validation_error(format!(
            "invalid email address: {email}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("ada@school.example").is_ok());
        assert!(validate_email("ada@localhost").is_err());
        assert!(validate_email("@school.example").is_err());
        assert!(validate_email("ada@@school.example").is_err());
        assert!(validate_email("a da@school.example").is_err());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Ada@School.Example "), "ada@school.example");
    }

    #[test]
    fn name_validation() {
        assert!(validate_name("Ada").is_ok());
        assert!(matches!(validate_name(""), Err(RepositoryError::Validation(_))));
        assert!(validate_name(&"x".repeat(256)).is_err());
    }
}
