//! Integration tests for entity CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Master data and user creation
//! - Unique constraint violations (username, email, serial number, code)
//! - Partial updates via COALESCE
//! - Team member-set replacement semantics

use gearguard_db::models::category::CreateCategory;
use gearguard_db::models::department::CreateDepartment;
use gearguard_db::models::equipment::{CreateEquipment, UpdateEquipment};
use gearguard_db::models::team::{CreateTeam, UpdateTeam};
use gearguard_db::models::user::{CreateUser, UpdateUser};
use gearguard_db::models::work_center::CreateWorkCenter;
use gearguard_db::repositories::{
    CategoryRepo, DepartmentRepo, EquipmentRepo, TeamRepo, UserRepo, WorkCenterRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fake-hash".to_string(),
        name: "Test User".to_string(),
        role: "employee".to_string(),
        department_id: None,
    }
}

fn new_equipment(serial: &str, category_id: i64) -> CreateEquipment {
    CreateEquipment {
        name: "Conveyor Belt Motor".to_string(),
        serial_number: serial.to_string(),
        category_id,
        department_id: None,
        assigned_employee_id: None,
        location: Some("Plant Floor A".to_string()),
        purchase_date: None,
        warranty_expiry_date: None,
        maintenance_team_id: None,
        default_technician_id: None,
        assigned_date: None,
        scrap_date: None,
        notes: None,
    }
}

async fn seed_category(pool: &PgPool) -> i64 {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: "Heavy Machinery".to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_department_and_category_crud(pool: PgPool) {
    let dept = DepartmentRepo::create(
        &pool,
        &CreateDepartment {
            name: "Operations".to_string(),
            description: Some("Plant Operations".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(dept.name, "Operations");

    let cat_id = seed_category(&pool).await;
    assert!(cat_id > 0);

    assert_eq!(DepartmentRepo::list(&pool).await.unwrap().len(), 1);
    assert_eq!(CategoryRepo::list(&pool).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_user_crud_and_unique_constraints(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@x.com"), &[]).await.unwrap();
    assert_eq!(user.username, "jdoe");
    assert!(user.is_active);

    // Duplicate username violates uq_users_username.
    let err = UserRepo::create(&pool, &new_user("jdoe", "other@x.com"), &[])
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected database error");
    assert_eq!(db_err.constraint(), Some("uq_users_username"));

    // Duplicate email violates uq_users_email.
    let err = UserRepo::create(&pool, &new_user("other", "jdoe@x.com"), &[])
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));

    // Partial update touches only the supplied fields.
    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            username: None,
            email: None,
            name: Some("Jane Doe".to_string()),
            role: Some("technician".to_string()),
            department_id: None,
            is_active: None,
        },
        None,
    )
    .await
    .unwrap()
    .expect("user should exist");
    assert_eq!(updated.username, "jdoe");
    assert_eq!(updated.name, "Jane Doe");
    assert_eq!(updated.role, "technician");

    // Update of a missing id returns None.
    let missing = UserRepo::update(&pool, 9999, &UpdateUser {
        username: None,
        email: None,
        name: None,
        role: None,
        department_id: None,
        is_active: None,
    }, None)
    .await
    .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_update_clears_reset_token(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@x.com"), &[]).await.unwrap();

    let expiry = chrono::Utc::now() + chrono::Duration::hours(1);
    UserRepo::set_reset_token(&pool, user.id, Some("token-digest"), Some(expiry))
        .await
        .unwrap();

    let found = UserRepo::find_by_reset_token_hash(&pool, "token-digest")
        .await
        .unwrap();
    assert!(found.is_some(), "unexpired token should resolve the user");

    let updated = UserRepo::update_password(&pool, user.id, "$argon2id$new-hash")
        .await
        .unwrap();
    assert!(updated);

    // Consuming the password update clears the token (single-use).
    let found = UserRepo::find_by_reset_token_hash(&pool, "token-digest")
        .await
        .unwrap();
    assert!(found.is_none(), "token must be cleared after password update");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_reset_token_not_found(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@x.com"), &[]).await.unwrap();

    let expiry = chrono::Utc::now() - chrono::Duration::minutes(5);
    UserRepo::set_reset_token(&pool, user.id, Some("stale-digest"), Some(expiry))
        .await
        .unwrap();

    let found = UserRepo::find_by_reset_token_hash(&pool, "stale-digest")
        .await
        .unwrap();
    assert!(found.is_none(), "expired token must not resolve");
}

// ---------------------------------------------------------------------------
// Teams and member replacement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_team_member_set_replacement(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("alice", "alice@x.com"), &[]).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob", "bob@x.com"), &[]).await.unwrap();

    let team = TeamRepo::create(
        &pool,
        &CreateTeam {
            name: "Maintenance Crew".to_string(),
            specialization: Some("Mechanical".to_string()),
            description: None,
        },
        &[alice.id, bob.id],
    )
    .await
    .unwrap();

    let mut members = TeamRepo::member_ids(&pool, team.id).await.unwrap();
    members.sort_unstable();
    assert_eq!(members, vec![alice.id, bob.id]);

    let no_change = UpdateTeam {
        name: None,
        specialization: None,
        description: None,
    };

    // Omitted member_ids leaves the set untouched.
    TeamRepo::update(&pool, team.id, &no_change, None).await.unwrap().unwrap();
    assert_eq!(TeamRepo::member_ids(&pool, team.id).await.unwrap().len(), 2);

    // Replacement with a single id.
    TeamRepo::update(&pool, team.id, &no_change, Some(&[bob.id])).await.unwrap().unwrap();
    assert_eq!(TeamRepo::member_ids(&pool, team.id).await.unwrap(), vec![bob.id]);

    // Empty array empties the set.
    TeamRepo::update(&pool, team.id, &no_change, Some(&[])).await.unwrap().unwrap();
    assert!(TeamRepo::member_ids(&pool, team.id).await.unwrap().is_empty());

    // The user side of the same join table.
    let user_teams = UserRepo::team_ids(&pool, bob.id).await.unwrap();
    assert!(user_teams.is_empty());
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_equipment_status_derived_on_create(pool: PgPool) {
    let cat_id = seed_category(&pool).await;

    let active = EquipmentRepo::create(&pool, &new_equipment("MTR-9988", cat_id))
        .await
        .unwrap();
    assert_eq!(active.status, "active");
    assert!(active.scrap_date.is_none());

    let mut scrapped_input = new_equipment("MTR-9989", cat_id);
    scrapped_input.scrap_date = Some(chrono::Utc::now());
    let scrapped = EquipmentRepo::create(&pool, &scrapped_input).await.unwrap();
    assert_eq!(scrapped.status, "scrapped");
    assert!(scrapped.scrap_date.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_equipment_duplicate_serial_rejected(pool: PgPool) {
    let cat_id = seed_category(&pool).await;

    EquipmentRepo::create(&pool, &new_equipment("SN123456", cat_id))
        .await
        .unwrap();

    let err = EquipmentRepo::create(&pool, &new_equipment("SN123456", cat_id))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected database error");
    assert_eq!(db_err.constraint(), Some("uq_equipment_serial_number"));

    // No second row was inserted.
    assert_eq!(EquipmentRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_equipment_scrap_date_tristate_update(pool: PgPool) {
    let cat_id = seed_category(&pool).await;
    let equipment = EquipmentRepo::create(&pool, &new_equipment("MTR-1", cat_id))
        .await
        .unwrap();

    // Set scrap_date (caller passes the matching derived status).
    let scrapped = EquipmentRepo::update(
        &pool,
        equipment.id,
        &UpdateEquipment {
            status: Some("scrapped".to_string()),
            scrap_date: Some(Some(chrono::Utc::now())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(scrapped.status, "scrapped");
    assert!(scrapped.scrap_date.is_some());

    // Omitted scrap_date leaves the column untouched.
    let renamed = EquipmentRepo::update(
        &pool,
        equipment.id,
        &UpdateEquipment {
            name: Some("Motor (rebuilt)".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Motor (rebuilt)");
    assert!(renamed.scrap_date.is_some(), "scrap_date must survive unrelated updates");

    // Present-and-null clears it.
    let reactivated = EquipmentRepo::update(
        &pool,
        equipment.id,
        &UpdateEquipment {
            status: Some("active".to_string()),
            scrap_date: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(reactivated.status, "active");
    assert!(reactivated.scrap_date.is_none());
}

// ---------------------------------------------------------------------------
// Work centers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_work_center_defaults_and_unique_code(pool: PgPool) {
    let wc = WorkCenterRepo::create(
        &pool,
        &CreateWorkCenter {
            name: "Assembly Line 1".to_string(),
            code: "AL-01".to_string(),
            tag: None,
            alternative_ids: None,
            cost_per_hour: Some(42.5),
            capacity: None,
            time_efficiency: None,
            oee_target: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(wc.cost_per_hour, 42.5);
    assert_eq!(wc.capacity, 1);
    assert_eq!(wc.time_efficiency, 100.0);
    assert_eq!(wc.oee_target, 90.0);
    assert_eq!(wc.status, "active");
    assert!(wc.alternative_ids.is_empty());

    let err = WorkCenterRepo::create(
        &pool,
        &CreateWorkCenter {
            name: "Assembly Line 1 bis".to_string(),
            code: "AL-01".to_string(),
            tag: None,
            alternative_ids: None,
            cost_per_hour: None,
            capacity: None,
            time_efficiency: None,
            oee_target: None,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("expected database error");
    assert_eq!(db_err.constraint(), Some("uq_work_centers_code"));
}
