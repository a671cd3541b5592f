//! Default roles, permissions and the grants between them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::collections::HashMap;
use uuid::Uuid;

use super::Seeder;
use crate::models::{Permission, Role, RoleHasPermission, permission, role, role_has_permission};

pub const GUARD_NAME: &str = "web";

pub const ROLES: &[&str] = &[
    "super-admin",
    "admin",
    "teacher",
    "student",
    "parent",
    "staff",
    "librarian",
    "accountant",
    "nurse",
    "transport-manager",
    "hostel-warden",
];

const RESOURCES: &[&str] = &[
    "users",
    "roles",
    "students",
    "teachers",
    "staff",
    "classes",
    "attendance",
    "grades",
    "exams",
    "courses",
    "assignments",
    "library",
    "transport",
    "hostel",
    "health",
    "fees",
    "payroll",
    "leave",
    "notifications",
    "reports",
    "settings",
];

const ACTIONS: &[&str] = &["view", "create", "update", "delete"];

/// Audit history can be read but never edited, so it only gets a view permission.
const EXTRA_PERMISSIONS: &[&str] = &["audit_logs.view"];

/// Grants per role. `*` matches everything, `resource.*` every action on a resource.
const GRANTS: &[(&str, &[&str])] = &[
    ("super-admin", &["*"]),
    (
        "admin",
        &[
            "users.*", "students.*", "teachers.*", "staff.*", "classes.*", "attendance.*",
            "grades.*", "exams.*", "courses.*", "assignments.*", "library.*", "transport.*",
            "hostel.*", "health.view", "fees.*", "payroll.view", "leave.*", "notifications.*",
            "reports.*", "settings.view", "settings.update", "roles.view", "audit_logs.view",
        ],
    ),
    (
        "teacher",
        &[
            "students.view", "classes.view", "attendance.view", "attendance.create",
            "attendance.update", "grades.view", "grades.create", "grades.update", "exams.view",
            "courses.view", "courses.update", "assignments.*", "library.view",
            "notifications.view", "leave.view", "leave.create",
        ],
    ),
    (
        "student",
        &[
            "courses.view", "assignments.view", "grades.view", "attendance.view",
            "library.view", "notifications.view",
        ],
    ),
    (
        "parent",
        &["students.view", "grades.view", "attendance.view", "fees.view", "notifications.view"],
    ),
    ("staff", &["notifications.view", "leave.view", "leave.create"]),
    ("librarian", &["library.*", "students.view", "notifications.view"]),
    ("accountant", &["fees.*", "payroll.*", "reports.view", "notifications.view"]),
    ("nurse", &["health.*", "students.view", "notifications.view"]),
    ("transport-manager", &["transport.*", "students.view", "notifications.view"]),
    ("hostel-warden", &["hostel.*", "students.view", "notifications.view"]),
];

/// What a seeding pass actually inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub permissions_created: usize,
    pub grants_created: u64,
}

pub struct RolesAndPermissionsSeeder;

/// Every permission name the seeder maintains, in a stable order
pub fn permission_names() -> Vec<String> {
    RESOURCES
        .iter()
        .flat_map(|resource| ACTIONS.iter().map(move |action| format!("{resource}.{action}")))
        .chain(EXTRA_PERMISSIONS.iter().map(|p| p.to_string()))
        .collect()
}

/// Permission names granted to `role`
pub fn granted_permissions(role: &str) -> Vec<String> {
    let patterns = GRANTS
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, patterns)| *patterns)
        .unwrap_or(&[]);

    permission_names()
        .into_iter()
        .filter(|permission| patterns.iter().any(|pattern| matches(pattern, permission)))
        .collect()
}

fn matches(pattern: &str, permission: &str) -> bool {
    match pattern.strip_suffix(".*") {
        _ if pattern == "*" => true,
        Some(resource) => permission
            .split_once('.')
            .is_some_and(|(r, _)| r == resource),
        None => pattern == permission,
    }
}

impl RolesAndPermissionsSeeder {
    pub async fn seed(&self, db: &DatabaseConnection) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        let mut permission_ids = HashMap::new();
        for name in permission_names() {
            let (id, created) = ensure_permission(db, &name).await?;
            report.permissions_created += usize::from(created);
            permission_ids.insert(name, id);
        }

        for role_name in ROLES {
            let (role_id, created) = ensure_role(db, role_name).await?;
            report.roles_created += usize::from(created);

            let grants: Vec<role_has_permission::ActiveModel> = granted_permissions(role_name)
                .iter()
                .filter_map(|name| permission_ids.get(name))
                .map(|permission_id| role_has_permission::ActiveModel {
                    permission_id: Set(*permission_id),
                    role_id: Set(role_id),
                })
                .collect();
            if grants.is_empty() {
                continue;
            }

            report.grants_created += RoleHasPermission::insert_many(grants)
                .on_conflict(
                    OnConflict::columns([
                        role_has_permission::Column::PermissionId,
                        role_has_permission::Column::RoleId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(db)
                .await
                .with_context(|| format!("granting permissions to role '{role_name}'"))?;
        }

        log::info!(
            "Seeded roles and permissions: {} roles, {} permissions, {} grants created",
            report.roles_created,
            report.permissions_created,
            report.grants_created
        );
        Ok(report)
    }
}

#[async_trait]
impl Seeder for RolesAndPermissionsSeeder {
    fn name(&self) -> &'static str {
        "roles_and_permissions"
    }

    async fn run(&self, db: &DatabaseConnection) -> Result<()> {
        self.seed(db).await.map(|_| ())
    }
}

/// Looks up a role by name, creating it when missing. Soft-deleted roles count
/// as present and are left trashed.
async fn ensure_role(db: &DatabaseConnection, name: &str) -> Result<(Uuid, bool)> {
    let existing = Role::find()
        .filter(role::Column::Name.eq(name))
        .filter(role::Column::GuardName.eq(GUARD_NAME))
        .one(db)
        .await
        .with_context(|| format!("loading role '{name}'"))?;
    if let Some(existing) = existing {
        return Ok((existing.id, false));
    }

    let now = Utc::now().fixed_offset();
    let created = role::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        guard_name: Set(GUARD_NAME.to_string()),
        description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .with_context(|| format!("creating role '{name}'"))?;

    log::debug!("Created role: {}", name);
    Ok((created.id, true))
}

async fn ensure_permission(db: &DatabaseConnection, name: &str) -> Result<(Uuid, bool)> {
    let existing = Permission::find()
        .filter(permission::Column::Name.eq(name))
        .filter(permission::Column::GuardName.eq(GUARD_NAME))
        .one(db)
        .await
        .with_context(|| format!("loading permission '{name}'"))?;
    if let Some(existing) = existing {
        return Ok((existing.id, false));
    }

    let now = Utc::now().fixed_offset();
    let created = permission::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        guard_name: Set(GUARD_NAME.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .with_context(|| format!("creating permission '{name}'"))?;

    Ok((created.id, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_gets_every_permission() {
        assert_eq!(granted_permissions("super-admin"), permission_names());
    }

    #[test]
    fn resource_wildcards_stay_within_the_resource() {
        let granted = granted_permissions("librarian");
        assert!(granted.contains(&"library.delete".to_string()));
        assert!(granted.contains(&"students.view".to_string()));
        assert!(!granted.contains(&"students.delete".to_string()));
    }

    #[test]
    fn every_role_has_grants_and_only_known_permissions() {
        let known = permission_names();
        for role in ROLES {
            let granted = granted_permissions(role);
            assert!(!granted.is_empty(), "{role} has no grants");
            assert!(granted.iter().all(|p| known.contains(p)));
        }
        for (role, patterns) in GRANTS {
            assert!(ROLES.contains(role), "grant for unknown role {role}");
            for pattern in *patterns {
                assert!(
                    known.iter().any(|p| matches(pattern, p)),
                    "{role}: pattern {pattern} matches nothing"
                );
            }
        }
    }

    #[test]
    fn audit_logs_are_view_only() {
        let names = permission_names();
        assert!(names.contains(&"audit_logs.view".to_string()));
        assert!(!names.iter().any(|p| p.starts_with("audit_logs.") && p != "audit_logs.view"));
    }
}
