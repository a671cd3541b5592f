//! Migration lifecycle tests against in-memory SQLite.

#[path = "test_utils/mod.rs"]
mod test_utils;

use campus::{migrate, schema};
use migration::common::add_soft_deletes;
use migration::{MigrationName, Migrator, MigratorTrait, SchemaManager};
use test_utils::{empty_test_db, setup_test_db};

#[tokio::test]
async fn every_migration_rolls_back_to_the_previous_schema() -> anyhow::Result<()> {
    let db = empty_test_db().await?;
    let names: Vec<String> = Migrator::migrations()
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    for name in &names {
        let before = schema::inspect(&db).await?;

        migrate::up(&db, Some(1)).await?;
        let after = schema::inspect(&db).await?;
        assert_ne!(before, after, "{name} did not change the schema");

        let issues = schema::verify_integrity(&after);
        assert!(issues.is_empty(), "{name} left integrity issues: {issues:?}");

        migrate::down(&db, Some(1)).await?;
        let restored = schema::inspect(&db).await?;
        assert_eq!(
            before,
            restored,
            "{name} down() did not restore tables {:?}",
            before.differing_tables(&restored)
        );

        migrate::up(&db, Some(1)).await?;
    }

    let states = migrate::status(&db).await?;
    assert_eq!(states.len(), names.len());
    assert!(states.iter().all(|s| s.applied));
    Ok(())
}

#[tokio::test]
async fn full_rollback_leaves_an_empty_schema() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    assert!(!schema::inspect(&db).await?.is_empty());

    migrate::reset(&db).await?;

    let snapshot = schema::inspect(&db).await?;
    assert!(
        snapshot.is_empty(),
        "tables left behind: {:?}",
        snapshot.table_names().collect::<Vec<_>>()
    );
    Ok(())
}

#[tokio::test]
async fn status_tracks_applied_and_pending() -> anyhow::Result<()> {
    let db = empty_test_db().await?;

    let states = migrate::status(&db).await?;
    assert!(!states.is_empty());
    assert!(states.iter().all(|s| !s.applied));

    migrate::up(&db, Some(2)).await?;
    let states = migrate::status(&db).await?;
    let applied: Vec<&str> = states
        .iter()
        .filter(|s| s.applied)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        applied,
        vec![
            "m2024_01_01_000001_create_users_table",
            "m2024_01_01_000002_create_permission_tables",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn refresh_and_fresh_rebuild_the_same_schema() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let migrated = schema::inspect(&db).await?;

    migrate::refresh(&db).await?;
    assert_eq!(schema::inspect(&db).await?, migrated);

    migrate::fresh(&db).await?;
    assert_eq!(schema::inspect(&db).await?, migrated);
    Ok(())
}

#[tokio::test]
async fn soft_delete_retrofit_is_idempotent() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let before = schema::inspect(&db).await?;

    let manager = SchemaManager::new(&db);
    add_soft_deletes(&manager, &["students", "users"]).await?;

    assert_eq!(schema::inspect(&db).await?, before);
    Ok(())
}

#[tokio::test]
async fn locale_columns_are_added_to_users() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let snapshot = schema::inspect(&db).await?;
    let users = snapshot.table("users").expect("users table");

    let locale = users.column("locale").expect("locale column");
    assert!(!locale.nullable);
    assert!(locale.default.as_deref().is_some_and(|d| d.contains("en")));
    assert!(users.column("timezone").is_some_and(|c| c.nullable));
    Ok(())
}
