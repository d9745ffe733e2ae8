//! Handlers for the `/equipment` resource.
//!
//! Equipment `status` is never written independently: whichever of
//! `scrap_date` / `status` the client drives, the other is recomputed so the
//! pair stays consistent (scrap_date set <=> scrapped).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use gearguard_core::error::CoreError;
use gearguard_core::lifecycle::derive_equipment_status;
use gearguard_core::status::EquipmentStatus;
use gearguard_core::types::DbId;

use gearguard_db::models::activity_log::{CreateActivityLog, REF_EQUIPMENT};
use gearguard_db::models::equipment::{CreateEquipment, UpdateEquipment};
use gearguard_db::repositories::{ActivityLogRepo, EquipmentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/equipment
pub async fn list_equipment(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let equipment = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: equipment }))
}

/// GET /api/v1/equipment/{id}
pub async fn get_equipment(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let equipment = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    Ok(Json(DataResponse { data: equipment }))
}

/// POST /api/v1/equipment
///
/// Create equipment. A duplicate serial number is rejected with a
/// field-naming conflict before any row is inserted.
pub async fn create_equipment(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEquipment>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if input.serial_number.trim().is_empty() {
        return Err(AppError::BadRequest("serial_number must not be empty".into()));
    }

    if EquipmentRepo::find_by_serial_number(&state.pool, &input.serial_number)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Serial number already exists".into(),
        )));
    }

    let equipment = EquipmentRepo::create(&state.pool, &input).await?;

    ActivityLogRepo::create(
        &state.pool,
        &CreateActivityLog {
            reference_type: REF_EQUIPMENT,
            reference_id: equipment.id,
            action: "created".into(),
            performed_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(equipment_id = equipment.id, user_id = auth.user_id, "Equipment created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: equipment })))
}

/// PUT /api/v1/equipment/{id}
///
/// Update equipment, applying the scrap/reactivate derivation:
/// - payload carries `scrap_date` -> `status` is recomputed from it;
/// - payload carries only `status` -> `scrap_date` is recomputed (now() when
///   scrapping, cleared when reactivating).
pub async fn update_equipment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipment>,
) -> AppResult<impl IntoResponse> {
    let current = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    if let Some(serial_number) = &input.serial_number {
        if serial_number != &current.serial_number {
            if EquipmentRepo::find_by_serial_number(&state.pool, serial_number)
                .await?
                .is_some()
            {
                return Err(AppError::Core(CoreError::Conflict(
                    "Serial number already exists".into(),
                )));
            }
        }
    }

    let input = reconcile_scrap_fields(input)?;

    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    let action = match (current.status.as_str(), equipment.status.as_str()) {
        ("active", "scrapped") => "scrapped",
        ("scrapped", "active") => "reactivated",
        _ => "updated",
    };
    ActivityLogRepo::create(
        &state.pool,
        &CreateActivityLog {
            reference_type: REF_EQUIPMENT,
            reference_id: id,
            action: action.into(),
            performed_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(equipment_id = id, user_id = auth.user_id, action, "Equipment updated");

    Ok(Json(DataResponse { data: equipment }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reconcile `status` and `scrap_date` in an update payload so exactly one
/// drives and the other matches. When both are supplied, `scrap_date` wins
/// (the invariant says scrap_date presence defines the status).
fn reconcile_scrap_fields(mut input: UpdateEquipment) -> AppResult<UpdateEquipment> {
    match (input.scrap_date, &input.status) {
        // scrap_date drives; recompute status.
        (Some(scrap_date), _) => {
            input.status = Some(derive_equipment_status(scrap_date).as_str().to_string());
        }
        // Only status supplied; recompute scrap_date.
        (None, Some(status)) => {
            let status = EquipmentStatus::parse(status).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid status '{status}'. Must be one of: active, scrapped"))
            })?;
            input.scrap_date = Some(match status {
                EquipmentStatus::Scrapped => Some(Utc::now()),
                EquipmentStatus::Active => None,
            });
            input.status = Some(status.as_str().to_string());
        }
        // Neither touched.
        (None, None) => {}
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scrap_date_drives_status() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let input = UpdateEquipment {
            scrap_date: Some(Some(ts)),
            ..Default::default()
        };
        let out = reconcile_scrap_fields(input).unwrap();
        assert_eq!(out.status.as_deref(), Some("scrapped"));

        let input = UpdateEquipment {
            scrap_date: Some(None),
            status: Some("scrapped".into()),
            ..Default::default()
        };
        let out = reconcile_scrap_fields(input).unwrap();
        assert_eq!(out.status.as_deref(), Some("active"));
    }

    #[test]
    fn status_alone_drives_scrap_date() {
        let input = UpdateEquipment {
            status: Some("scrapped".into()),
            ..Default::default()
        };
        let out = reconcile_scrap_fields(input).unwrap();
        assert!(matches!(out.scrap_date, Some(Some(_))));

        let input = UpdateEquipment {
            status: Some("active".into()),
            ..Default::default()
        };
        let out = reconcile_scrap_fields(input).unwrap();
        assert_eq!(out.scrap_date, Some(None));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let input = UpdateEquipment {
            status: Some("retired".into()),
            ..Default::default()
        };
        assert!(reconcile_scrap_fields(input).is_err());
    }

    #[test]
    fn untouched_payload_passes_through() {
        let input = UpdateEquipment {
            name: Some("Press".into()),
            ..Default::default()
        };
        let out = reconcile_scrap_fields(input).unwrap();
        assert!(out.scrap_date.is_none());
        assert!(out.status.is_none());
    }
}
