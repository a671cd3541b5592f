//! Referential actions and uniqueness enforced by the migrated schema.

#[path = "test_utils/mod.rs"]
mod test_utils;

use campus::error::{is_foreign_key_violation, is_unique_violation};
use sea_orm::Value;
use test_utils::*;
use uuid::Uuid;

#[tokio::test]
async fn deleting_a_user_cascades_to_profiles() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let user_id = create_user(&db, "pupil@school.example").await?;
    insert(
        &db,
        "students",
        vec![
            ("id", Uuid::new_v4().into()),
            ("user_id", user_id.into()),
            ("admission_number", "ADM-001".into()),
        ],
    )
    .await?;
    assert_eq!(count_where(&db, "students", "user_id", user_id.into()).await?, 1);

    assert_eq!(delete_by_id(&db, "users", user_id).await?, 1);

    assert_eq!(count_where(&db, "students", "user_id", user_id.into()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn deleting_a_student_cascades_to_academic_records() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let institution_id = create_institution(&db, "EAST").await?;
    let year_id = create_academic_year(&db, institution_id).await?;
    let user_id = create_user(&db, "pupil@school.example").await?;
    let student_id = Uuid::new_v4();
    insert(
        &db,
        "students",
        vec![
            ("id", student_id.into()),
            ("user_id", user_id.into()),
            ("admission_number", "ADM-002".into()),
        ],
    )
    .await?;

    let class_id = Uuid::new_v4();
    let subject_id = Uuid::new_v4();
    let term_id = Uuid::new_v4();
    let parents: [(&str, Vec<(&str, Value)>); 3] = [
        (
            "classes",
            vec![
                ("id", class_id.into()),
                ("institution_id", institution_id.into()),
                ("academic_year_id", year_id.into()),
                ("name", "Grade 6 B".into()),
            ],
        ),
        (
            "subjects",
            vec![
                ("id", subject_id.into()),
                ("institution_id", institution_id.into()),
                ("name", "Mathematics".into()),
                ("code", "MATH-6".into()),
            ],
        ),
        (
            "terms",
            vec![
                ("id", term_id.into()),
                ("academic_year_id", year_id.into()),
                ("name", "Autumn".into()),
                ("sequence", 1i16.into()),
                ("starts_on", "2024-09-01".into()),
                ("ends_on", "2024-12-20".into()),
            ],
        ),
    ];
    for (table, values) in parents {
        insert(&db, table, values).await?;
    }

    insert(
        &db,
        "enrollments",
        vec![
            ("id", Uuid::new_v4().into()),
            ("student_id", student_id.into()),
            ("class_id", class_id.into()),
            ("academic_year_id", year_id.into()),
            ("enrolled_on", "2024-09-02".into()),
        ],
    )
    .await?;
    insert(
        &db,
        "attendances",
        vec![
            ("id", Uuid::new_v4().into()),
            ("student_id", student_id.into()),
            ("class_id", class_id.into()),
            ("attended_on", "2024-09-03".into()),
        ],
    )
    .await?;
    insert(
        &db,
        "grades",
        vec![
            ("id", Uuid::new_v4().into()),
            ("student_id", student_id.into()),
            ("subject_id", subject_id.into()),
            ("term_id", term_id.into()),
            ("class_id", class_id.into()),
            ("score", 87.5f64.into()),
        ],
    )
    .await?;

    let owned = ["enrollments", "attendances", "grades"];
    for table in owned {
        assert_eq!(count_where(&db, table, "student_id", student_id.into()).await?, 1);
    }

    assert_eq!(delete_by_id(&db, "students", student_id).await?, 1);

    for table in owned {
        assert_eq!(
            count_where(&db, table, "student_id", student_id.into()).await?,
            0,
            "{table} rows outlived their student"
        );
    }
    assert_eq!(count_where(&db, "classes", "id", class_id.into()).await?, 1);
    assert_eq!(count_where(&db, "subjects", "id", subject_id.into()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_a_book_removes_copies_and_reservations() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let institution_id = create_institution(&db, "WEST").await?;
    let user_id = create_user(&db, "reader@school.example").await?;

    let member_id = Uuid::new_v4();
    insert(
        &db,
        "library_members",
        vec![
            ("id", member_id.into()),
            ("user_id", user_id.into()),
            ("membership_number", "LIB-001".into()),
        ],
    )
    .await?;

    let book_id = Uuid::new_v4();
    insert(
        &db,
        "books",
        vec![
            ("id", book_id.into()),
            ("institution_id", institution_id.into()),
            ("title", "A Brief History of Time".into()),
        ],
    )
    .await?;
    for barcode in ["BC-0001", "BC-0002"] {
        insert(
            &db,
            "book_copies",
            vec![
                ("id", Uuid::new_v4().into()),
                ("book_id", book_id.into()),
                ("barcode", barcode.into()),
            ],
        )
        .await?;
    }
    insert(
        &db,
        "book_reservations",
        vec![
            ("id", Uuid::new_v4().into()),
            ("book_id", book_id.into()),
            ("library_member_id", member_id.into()),
        ],
    )
    .await?;
    assert_eq!(count_where(&db, "book_copies", "book_id", book_id.into()).await?, 2);

    assert_eq!(delete_by_id(&db, "books", book_id).await?, 1);

    assert_eq!(count_where(&db, "book_copies", "book_id", book_id.into()).await?, 0);
    assert_eq!(count_where(&db, "book_reservations", "book_id", book_id.into()).await?, 0);
    assert_eq!(count_where(&db, "library_members", "id", member_id.into()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn removing_a_homeroom_teacher_keeps_the_class() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let institution_id = create_institution(&db, "NORTH").await?;
    let year_id = create_academic_year(&db, institution_id).await?;
    let user_id = create_user(&db, "teacher@school.example").await?;
    let teacher_id = create_teacher(&db, user_id, institution_id, "T-001").await?;

    let class_id = Uuid::new_v4();
    insert(
        &db,
        "classes",
        vec![
            ("id", class_id.into()),
            ("institution_id", institution_id.into()),
            ("academic_year_id", year_id.into()),
            ("homeroom_teacher_id", teacher_id.into()),
            ("name", "Grade 5 A".into()),
        ],
    )
    .await?;
    assert_eq!(count_null(&db, "classes", "homeroom_teacher_id").await?, 0);

    delete_by_id(&db, "teachers", teacher_id).await?;

    assert_eq!(count_where(&db, "classes", "id", class_id.into()).await?, 1);
    assert_eq!(count_null(&db, "classes", "homeroom_teacher_id").await?, 1);
    Ok(())
}

#[tokio::test]
async fn audit_trail_survives_user_removal() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let user_id = create_user(&db, "admin@school.example").await?;
    let log_id = Uuid::new_v4();
    insert(
        &db,
        "audit_logs",
        vec![
            ("id", log_id.into()),
            ("user_id", user_id.into()),
            ("event", "updated".into()),
            ("auditable_type", "students".into()),
        ],
    )
    .await?;

    delete_by_id(&db, "users", user_id).await?;

    assert_eq!(count_where(&db, "audit_logs", "id", log_id.into()).await?, 1);
    assert_eq!(count_null(&db, "audit_logs", "user_id").await?, 1);
    Ok(())
}

#[tokio::test]
async fn role_assignment_is_unique_per_model() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let role_id = Uuid::new_v4();
    insert(&db, "roles", vec![("id", role_id.into()), ("name", "teacher".into())]).await?;

    let model_id = Uuid::new_v4();
    let assignment = || -> Vec<(&'static str, Value)> {
        vec![
            ("role_id", role_id.into()),
            ("model_type", "user".into()),
            ("model_id", model_id.into()),
        ]
    };
    insert(&db, "model_has_roles", assignment()).await?;

    let err = insert(&db, "model_has_roles", assignment())
        .await
        .expect_err("duplicate assignment must fail");
    assert!(is_unique_violation(&err), "unexpected error: {err:?}");

    // The same role on a different model type is a different assignment.
    insert(
        &db,
        "model_has_roles",
        vec![
            ("role_id", role_id.into()),
            ("model_type", "guardian".into()),
            ("model_id", model_id.into()),
        ],
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn leave_balance_is_unique_per_staff_type_and_year() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let institution_id = create_institution(&db, "SOUTH").await?;
    let user_id = create_user(&db, "clerk@school.example").await?;
    let staff_id = create_staff(&db, user_id, institution_id, "S-001").await?;

    let leave_type_id = Uuid::new_v4();
    insert(
        &db,
        "leave_types",
        vec![
            ("id", leave_type_id.into()),
            ("institution_id", institution_id.into()),
            ("name", "Annual".into()),
        ],
    )
    .await?;

    let balance = |year: i16| -> Vec<(&'static str, Value)> {
        vec![
            ("id", Uuid::new_v4().into()),
            ("staff_id", staff_id.into()),
            ("leave_type_id", leave_type_id.into()),
            ("year", year.into()),
        ]
    };

    insert(&db, "leave_balances", balance(2024)).await?;
    insert(&db, "leave_balances", balance(2025)).await?;
    let err = insert(&db, "leave_balances", balance(2024))
        .await
        .expect_err("duplicate balance must fail");
    assert!(is_unique_violation(&err), "unexpected error: {err:?}");
    Ok(())
}

#[tokio::test]
async fn references_to_missing_rows_are_rejected() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let err = insert(
        &db,
        "students",
        vec![
            ("id", Uuid::new_v4().into()),
            ("user_id", Uuid::new_v4().into()),
            ("admission_number", "ADM-404".into()),
        ],
    )
    .await
    .expect_err("dangling user reference must fail");
    assert!(is_foreign_key_violation(&err), "unexpected error: {err:?}");
    Ok(())
}

#[tokio::test]
async fn duplicate_emails_are_rejected() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    create_user(&db, "same@school.example").await?;
    let err = create_user(&db, "same@school.example")
        .await
        .expect_err("duplicate email must fail");
    assert!(is_unique_violation(&err));
    Ok(())
}
