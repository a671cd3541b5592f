//! Repository behaviour against a migrated in-memory database.

#[path = "test_utils/mod.rs"]
mod test_utils;

use campus::error::RepositoryError;
use campus::repositories::{
    AuditLogRepository, CreateUserRequest, EnrollStudentRequest, NewAuditEntry, StudentRepository,
    UserRepository,
};
use campus::seeds::RolesAndPermissionsSeeder;
use campus::soft_delete::TrashedScope;
use serde_json::json;
use test_utils::{count_where, setup_test_db};
use uuid::Uuid;

fn user_request(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        phone: None,
        locale: None,
        timezone: None,
    }
}

fn enroll_request(user_id: Uuid, admission_number: &str) -> EnrollStudentRequest {
    EnrollStudentRequest {
        user_id,
        institution_id: None,
        admission_number: admission_number.to_string(),
        date_of_birth: None,
        gender: None,
        admitted_on: None,
    }
}

#[tokio::test]
async fn create_user_normalizes_and_defaults() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let repo = UserRepository::new(&db);

    let user = repo.create(user_request("  Ada@School.Example ")).await?;
    assert_eq!(user.email, "ada@school.example");
    assert_eq!(user.locale, "en");
    assert_eq!(user.status, "active");
    assert!(user.deleted_at.is_none());

    let found = repo
        .find_by_email("ADA@school.example", TrashedScope::WithoutTrashed)
        .await?
        .expect("user is found by email");
    assert_eq!(found.id, user.id);
    Ok(())
}

#[tokio::test]
async fn create_user_rejects_invalid_input_and_duplicates() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let repo = UserRepository::new(&db);

    let mut nameless = user_request("nameless@school.example");
    nameless.name = "   ".to_string();
    assert!(matches!(
        repo.create(nameless).await,
        Err(RepositoryError::Validation(_))
    ));
    assert!(matches!(
        repo.create(user_request("not-an-email")).await,
        Err(RepositoryError::Validation(_))
    ));

    repo.create(user_request("ada@school.example")).await?;
    assert!(matches!(
        repo.create(user_request("ada@school.example")).await,
        Err(RepositoryError::Conflict(_))
    ));
    Ok(())
}

#[tokio::test]
async fn soft_deleted_users_follow_trashed_scope() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let repo = UserRepository::new(&db);
    let kept = repo.create(user_request("kept@school.example")).await?;
    let trashed = repo.create(user_request("trashed@school.example")).await?;

    repo.soft_delete(trashed.id).await?;

    assert!(repo.find_by_id(trashed.id, TrashedScope::WithoutTrashed).await?.is_none());
    let found = repo
        .find_by_id(trashed.id, TrashedScope::WithTrashed)
        .await?
        .expect("trashed user visible with trashed scope");
    assert!(found.deleted_at.is_some());

    let ids = |users: Vec<campus::models::user::Model>| {
        users.into_iter().map(|u| u.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(repo.list(TrashedScope::WithoutTrashed).await?), vec![kept.id]);
    assert_eq!(ids(repo.list(TrashedScope::OnlyTrashed).await?), vec![trashed.id]);
    assert_eq!(repo.list(TrashedScope::WithTrashed).await?.len(), 2);

    // A trashed user still holds its email.
    assert!(matches!(
        repo.create(user_request("trashed@school.example")).await,
        Err(RepositoryError::Conflict(_))
    ));

    assert!(matches!(
        repo.soft_delete(trashed.id).await,
        Err(RepositoryError::NotFound { .. })
    ));
    repo.restore(trashed.id).await?;
    assert!(repo.find_by_id(trashed.id, TrashedScope::WithoutTrashed).await?.is_some());
    assert!(matches!(
        repo.restore(trashed.id).await,
        Err(RepositoryError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn force_delete_removes_profile_and_roles() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    RolesAndPermissionsSeeder.seed(&db).await?;
    let users = UserRepository::new(&db);
    let students = StudentRepository::new(&db);

    let user = users.create(user_request("pupil@school.example")).await?;
    students.enroll(enroll_request(user.id, "ADM-100")).await?;
    users.assign_role(user.id, "student").await?;
    users.soft_delete(user.id).await?;

    users.force_delete(user.id).await?;

    assert!(users.find_by_id(user.id, TrashedScope::WithTrashed).await?.is_none());
    assert!(
        students
            .find_by_admission_number("ADM-100", TrashedScope::WithTrashed)
            .await?
            .is_none()
    );
    assert_eq!(count_where(&db, "model_has_roles", "model_id", user.id.into()).await?, 0);
    assert!(matches!(
        users.force_delete(user.id).await,
        Err(RepositoryError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn role_assignment_is_idempotent() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    RolesAndPermissionsSeeder.seed(&db).await?;
    let repo = UserRepository::new(&db);
    let user = repo.create(user_request("teacher@school.example")).await?;

    assert!(repo.assign_role(user.id, "teacher").await?);
    assert!(!repo.assign_role(user.id, "teacher").await?);
    assert!(repo.assign_role(user.id, "librarian").await?);

    assert_eq!(repo.role_names(user.id).await?, vec!["librarian", "teacher"]);
    assert!(matches!(
        repo.assign_role(user.id, "headmaster").await,
        Err(RepositoryError::NotFound { entity: "role", .. })
    ));
    Ok(())
}

#[tokio::test]
async fn enrollment_enforces_one_profile_per_user() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let users = UserRepository::new(&db);
    let students = StudentRepository::new(&db);
    let first = users.create(user_request("first@school.example")).await?;
    let second = users.create(user_request("second@school.example")).await?;

    let student = students.enroll(enroll_request(first.id, " ADM-1 ")).await?;
    assert_eq!(student.admission_number, "ADM-1");

    assert!(matches!(
        students.enroll(enroll_request(first.id, "ADM-2")).await,
        Err(RepositoryError::Conflict(_))
    ));
    assert!(matches!(
        students.enroll(enroll_request(second.id, "ADM-1")).await,
        Err(RepositoryError::Conflict(_))
    ));
    assert!(matches!(
        students.enroll(enroll_request(Uuid::new_v4(), "ADM-3")).await,
        Err(RepositoryError::NotFound { entity: "user", .. })
    ));
    assert!(matches!(
        students.enroll(enroll_request(second.id, "")).await,
        Err(RepositoryError::Validation(_))
    ));
    Ok(())
}

#[tokio::test]
async fn list_active_hides_trashed_students() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let users = UserRepository::new(&db);
    let students = StudentRepository::new(&db);

    let mut enrolled = Vec::new();
    for (email, number) in [("b@school.example", "ADM-B"), ("a@school.example", "ADM-A")] {
        let user = users.create(user_request(email)).await?;
        enrolled.push(students.enroll(enroll_request(user.id, number)).await?);
    }

    let numbers = |list: Vec<campus::models::student::Model>| {
        list.into_iter().map(|s| s.admission_number).collect::<Vec<_>>()
    };
    assert_eq!(numbers(students.list_active().await?), vec!["ADM-A", "ADM-B"]);

    students.soft_delete(enrolled[0].id).await?;
    assert_eq!(numbers(students.list_active().await?), vec!["ADM-A"]);
    assert!(
        students
            .find_by_admission_number("ADM-B", TrashedScope::OnlyTrashed)
            .await?
            .is_some()
    );

    students.restore(enrolled[0].id).await?;
    assert_eq!(students.list_active().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn audit_entries_are_queryable_by_record_and_user() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let user = UserRepository::new(&db)
        .create(user_request("admin@school.example"))
        .await?;
    let repo = AuditLogRepository::new(&db);
    let student_id = Uuid::new_v4();

    for event in ["created", "updated"] {
        repo.record(NewAuditEntry {
            user_id: Some(user.id),
            event: event.to_string(),
            auditable_type: "students".to_string(),
            auditable_id: Some(student_id),
            new_values: Some(json!({ "status": "active" })),
            ip_address: Some("203.0.113.7".to_string()),
            ..Default::default()
        })
        .await?;
    }
    repo.record(NewAuditEntry {
        event: "login".to_string(),
        auditable_type: "users".to_string(),
        auditable_id: Some(user.id),
        ..Default::default()
    })
    .await?;

    let history = repo.for_auditable("students", student_id).await?;
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.new_values == Some(json!({ "status": "active" }))));

    assert_eq!(repo.for_user(user.id).await?.len(), 2);

    assert!(matches!(
        repo.record(NewAuditEntry {
            auditable_type: "students".to_string(),
            ..Default::default()
        })
        .await,
        Err(RepositoryError::Validation(_))
    ));
    Ok(())
}
