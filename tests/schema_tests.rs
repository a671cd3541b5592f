//! Structural checks on the fully migrated schema.

#[path = "test_utils/mod.rs"]
mod test_utils;

use campus::schema::{self, DELETED_AT, ReferentialAction};
use migration::SOFT_DELETE_EXEMPT_TABLES;
use migration::common::soft_delete_index_name;
use test_utils::setup_test_db;

#[tokio::test]
async fn migrated_schema_has_no_issues() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let snapshot = schema::inspect(&db).await?;

    let issues = schema::verify(&snapshot);
    assert!(issues.is_empty(), "schema issues: {issues:#?}");
    assert!(snapshot.tables.len() >= 100, "only {} tables", snapshot.tables.len());
    Ok(())
}

#[tokio::test]
async fn soft_deletes_cover_every_table_but_the_exempt_ones() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let snapshot = schema::inspect(&db).await?;

    for table in snapshot.tables.values() {
        let exempt = SOFT_DELETE_EXEMPT_TABLES.contains(&table.name.as_str());
        assert_eq!(
            table.has_column(DELETED_AT),
            !exempt,
            "unexpected soft-delete state on {}",
            table.name
        );
        if !exempt {
            let index = soft_delete_index_name(&table.name);
            assert!(
                table.indexes.iter().any(|i| i.name == index && i.columns == [DELETED_AT]),
                "{} is missing {index}",
                table.name
            );
            assert!(table.column(DELETED_AT).is_some_and(|c| c.nullable));
        }
    }

    let audit_logs = snapshot.table("audit_logs").expect("audit_logs exists");
    assert!(!audit_logs.has_column(DELETED_AT));
    assert!(!audit_logs.has_column("updated_at"));
    Ok(())
}

#[tokio::test]
async fn domain_tables_use_uuid_primary_keys() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let snapshot = schema::inspect(&db).await?;

    for table in snapshot.tables.values().filter(|t| t.has_column("id")) {
        assert_eq!(table.primary_key, ["id"], "{} primary key", table.name);
        let id = table.column("id").expect("id column");
        assert!(id.data_type.contains("uuid"), "{}.id is {}", table.name, id.data_type);
        assert_eq!(id.default, None, "{}.id has a default on SQLite", table.name);
    }
    Ok(())
}

#[tokio::test]
async fn reference_actions_match_ownership() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let snapshot = schema::inspect(&db).await?;

    let action = |table: &str, column: &str| {
        snapshot
            .table(table)
            .and_then(|t| t.foreign_keys.iter().find(|fk| fk.columns == [column]))
            .map(|fk| fk.on_delete)
    };

    assert_eq!(action("students", "user_id"), Some(ReferentialAction::Cascade));
    assert_eq!(action("classes", "homeroom_teacher_id"), Some(ReferentialAction::SetNull));
    assert_eq!(action("audit_logs", "user_id"), Some(ReferentialAction::SetNull));
    assert_eq!(
        action("leave_balances", "leave_type_id"),
        Some(ReferentialAction::Cascade)
    );
    Ok(())
}

#[tokio::test]
async fn composite_uniqueness_is_indexed() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let snapshot = schema::inspect(&db).await?;

    let key = |cols: &[&str]| cols.iter().map(|c| c.to_string()).collect::<Vec<_>>();

    let balances = snapshot.table("leave_balances").expect("leave_balances");
    assert!(balances.is_unique_key(&key(&["staff_id", "leave_type_id", "year"])));

    let roles = snapshot.table("model_has_roles").expect("model_has_roles");
    assert!(roles.is_unique_key(&key(&["role_id", "model_id", "model_type"])));
    assert!(!roles.has_column(DELETED_AT));
    Ok(())
}
