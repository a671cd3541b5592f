//! Seeder tests.

#[path = "test_utils/mod.rs"]
mod test_utils;

use campus::models::{Permission, Role, RoleHasPermission, role};
use campus::seeds::roles_and_permissions::{ROLES, granted_permissions, permission_names};
use campus::seeds::{self, RolesAndPermissionsSeeder, Seeder};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};
use test_utils::setup_test_db;

#[tokio::test]
async fn seeds_default_roles_and_permissions() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    let report = RolesAndPermissionsSeeder.seed(&db).await?;
    assert_eq!(report.roles_created, ROLES.len());
    assert_eq!(report.permissions_created, permission_names().len());

    let mut names: Vec<String> = Role::find()
        .all(&db)
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();
    names.sort();
    let mut expected: Vec<String> = ROLES.iter().map(|r| r.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);

    let expected_grants: usize = ROLES.iter().map(|r| granted_permissions(r).len()).sum();
    assert_eq!(report.grants_created as usize, expected_grants);
    assert_eq!(RoleHasPermission::find().count(&db).await? as usize, expected_grants);
    Ok(())
}

#[tokio::test]
async fn seeding_twice_changes_nothing() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    RolesAndPermissionsSeeder.seed(&db).await?;

    let second = RolesAndPermissionsSeeder.seed(&db).await?;
    assert_eq!(second, Default::default());
    assert_eq!(Role::find().count(&db).await? as usize, ROLES.len());
    assert_eq!(
        Permission::find().count(&db).await? as usize,
        permission_names().len()
    );
    Ok(())
}

#[tokio::test]
async fn super_admin_holds_every_permission() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    seeds::run_all(&db).await?;

    let super_admin = Role::find()
        .filter(role::Column::Name.eq("super-admin"))
        .one(&db)
        .await?
        .expect("super-admin role exists");
    let permissions = super_admin.find_related(Permission).all(&db).await?;
    assert_eq!(permissions.len(), permission_names().len());
    Ok(())
}

#[test]
fn registered_seeders_have_names() {
    let names: Vec<&str> = seeds::registered().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["roles_and_permissions"]);
}
