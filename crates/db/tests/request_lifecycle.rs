//! Integration tests for maintenance-request persistence:
//! technician-set replacement, the transactional scrap cascade, and
//! worksheet storage.

use gearguard_db::models::category::CreateCategory;
use gearguard_db::models::equipment::CreateEquipment;
use gearguard_db::models::request::{CreateRequest, UpdateRequest};
use gearguard_db::models::user::CreateUser;
use gearguard_db::models::worksheet::CreateWorksheet;
use gearguard_db::repositories::{
    ActivityLogRepo, CategoryRepo, EquipmentRepo, RequestRepo, UserRepo, WorksheetRepo,
};
use gearguard_db::models::activity_log::{CreateActivityLog, REF_REQUEST};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@x.com"),
            password_hash: "$argon2id$fake-hash".to_string(),
            name: username.to_string(),
            role: "technician".to_string(),
            department_id: None,
        },
        &[],
    )
    .await
    .unwrap()
    .id
}

async fn seed_equipment(pool: &PgPool, serial: &str) -> i64 {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: format!("Category {serial}"),
            description: None,
        },
    )
    .await
    .unwrap();

    EquipmentRepo::create(
        pool,
        &CreateEquipment {
            name: "Hydraulic Press".to_string(),
            serial_number: serial.to_string(),
            category_id: category.id,
            department_id: None,
            assigned_employee_id: None,
            location: None,
            purchase_date: None,
            warranty_expiry_date: None,
            maintenance_team_id: None,
            default_technician_id: None,
            assigned_date: None,
            scrap_date: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_request(equipment_id: i64) -> CreateRequest {
    CreateRequest {
        subject: "Press is leaking".to_string(),
        description: "Hydraulic fluid on the floor".to_string(),
        request_type: "corrective".to_string(),
        equipment_id: Some(equipment_id),
        work_center_id: None,
        maintenance_team_id: None,
        assigned_technician_id: None,
        scheduled_date: None,
        actual_start_date: None,
        completed_date: None,
        duration_hours: Some(4),
        priority: None,
        technician_ids: None,
    }
}

// ---------------------------------------------------------------------------
// Creation and technician sets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_request_with_technicians_round_trips(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let tech_a = seed_user(&pool, "tech_a").await;
    let tech_b = seed_user(&pool, "tech_b").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;

    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[tech_a, tech_b])
        .await
        .unwrap();
    assert_eq!(request.status, "new");
    assert_eq!(request.priority, "medium");
    assert_eq!(request.created_by, creator);

    // Fetched set equals the input as a set (order not guaranteed).
    let mut technician_ids = RequestRepo::technician_ids(&pool, request.id).await.unwrap();
    technician_ids.sort_unstable();
    let mut expected = vec![tech_a, tech_b];
    expected.sort_unstable();
    assert_eq!(technician_ids, expected);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_technician_set_replacement_semantics(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let tech_a = seed_user(&pool, "tech_a").await;
    let tech_b = seed_user(&pool, "tech_b").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;

    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[tech_a])
        .await
        .unwrap();

    let no_change = UpdateRequest::default();

    // Omitted technician_ids leaves assignments untouched.
    RequestRepo::update(&pool, request.id, &no_change, "new", None, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        RequestRepo::technician_ids(&pool, request.id).await.unwrap(),
        vec![tech_a]
    );

    // A new array replaces the set wholesale.
    RequestRepo::update(&pool, request.id, &no_change, "new", Some(&[tech_b]), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        RequestRepo::technician_ids(&pool, request.id).await.unwrap(),
        vec![tech_b]
    );

    // An empty array empties the set.
    RequestRepo::update(&pool, request.id, &no_change, "new", Some(&[]), None)
        .await
        .unwrap()
        .unwrap();
    assert!(RequestRepo::technician_ids(&pool, request.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Scheduled date tri-state and status writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_scheduled_date_tristate(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;
    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[])
        .await
        .unwrap();

    let when = chrono::Utc::now() + chrono::Duration::days(1);

    // Setting the date persists it; the caller-resolved status is written.
    let updated = RequestRepo::update(
        &pool,
        request.id,
        &UpdateRequest {
            scheduled_date: Some(Some(when)),
            ..Default::default()
        },
        "in_progress",
        None,
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "in_progress");
    assert!(updated.scheduled_date.is_some());

    // Omitting the field leaves the stored date untouched.
    let untouched = RequestRepo::update(
        &pool,
        request.id,
        &UpdateRequest {
            subject: Some("Press is leaking badly".to_string()),
            ..Default::default()
        },
        "in_progress",
        None,
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(untouched.scheduled_date.is_some());

    // Present-and-null clears it.
    let cleared = RequestRepo::update(
        &pool,
        request.id,
        &UpdateRequest {
            scheduled_date: Some(None),
            ..Default::default()
        },
        "in_progress",
        None,
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.scheduled_date.is_none());
}

// ---------------------------------------------------------------------------
// Scrap cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_scrap_cascade_updates_equipment_in_same_transaction(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;
    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[])
        .await
        .unwrap();

    let before = chrono::Utc::now();

    RequestRepo::update(
        &pool,
        request.id,
        &UpdateRequest::default(),
        "scrap",
        None,
        Some(equipment_id),
    )
    .await
    .unwrap()
    .unwrap();

    let equipment = EquipmentRepo::find_by_id(&pool, equipment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(equipment.status, "scrapped");
    let scrap_date = equipment.scrap_date.expect("scrap_date must be set");
    assert!(scrap_date >= before, "scrap_date must be at or after the update time");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cascade_does_not_overwrite_existing_scrap_date(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;

    // Scrap the equipment directly first.
    let original_date = chrono::Utc::now() - chrono::Duration::days(7);
    sqlx::query("UPDATE equipment SET status = 'scrapped', scrap_date = $2 WHERE id = $1")
        .bind(equipment_id)
        .bind(original_date)
        .execute(&pool)
        .await
        .unwrap();

    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[])
        .await
        .unwrap();

    RequestRepo::update(
        &pool,
        request.id,
        &UpdateRequest::default(),
        "scrap",
        None,
        Some(equipment_id),
    )
    .await
    .unwrap()
    .unwrap();

    let equipment = EquipmentRepo::find_by_id(&pool, equipment_id)
        .await
        .unwrap()
        .unwrap();
    let scrap_date = equipment.scrap_date.unwrap();
    assert!(
        (scrap_date - original_date).num_seconds().abs() < 1,
        "already-scrapped equipment keeps its original scrap_date"
    );
}

// ---------------------------------------------------------------------------
// Worksheets and activity logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_worksheet_crud(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;
    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[])
        .await
        .unwrap();

    let start = chrono::Utc::now();
    let end = start + chrono::Duration::minutes(150);
    let worksheet = WorksheetRepo::create(
        &pool,
        request.id,
        creator,
        &CreateWorksheet {
            start_time: start,
            end_time: end,
            description: Some("Replaced the seal".to_string()),
        },
    )
    .await
    .unwrap();

    let entries = WorksheetRepo::list_for_request(&pool, request.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, worksheet.id);

    assert!(WorksheetRepo::delete(&pool, worksheet.id).await.unwrap());
    assert!(!WorksheetRepo::delete(&pool, worksheet.id).await.unwrap());
    assert!(WorksheetRepo::list_for_request(&pool, request.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_activity_log_append_and_list(pool: PgPool) {
    let creator = seed_user(&pool, "creator").await;
    let equipment_id = seed_equipment(&pool, "EQ-1").await;
    let request = RequestRepo::create(&pool, &new_request(equipment_id), creator, &[])
        .await
        .unwrap();

    ActivityLogRepo::create(
        &pool,
        &CreateActivityLog {
            reference_type: REF_REQUEST,
            reference_id: request.id,
            action: "created".to_string(),
            performed_by: creator,
        },
    )
    .await
    .unwrap();

    let logs = ActivityLogRepo::list(&pool).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].reference_type, "request");
    assert_eq!(logs[0].reference_id, request.id);
    assert_eq!(logs[0].action, "created");
}
