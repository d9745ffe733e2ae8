//! Handlers for the `/requests` resource (maintenance requests).
//!
//! Creation applies equipment defaults (team, technician seeding); update
//! applies the new -> in_progress transition when a schedule date is set and
//! cascades equipment scrapping inside the repository transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gearguard_core::error::CoreError;
use gearguard_core::lifecycle::{
    apply_equipment_defaults, resolve_update_status, should_cascade_scrap, validate_unique_ids,
    EquipmentDefaults,
};
use gearguard_core::status::{Priority, RequestStatus, RequestType};
use gearguard_core::types::DbId;

use gearguard_db::models::activity_log::{CreateActivityLog, REF_EQUIPMENT, REF_REQUEST};
use gearguard_db::models::request::{CreateRequest, RequestResponse, UpdateRequest};
use gearguard_db::repositories::{ActivityLogRepo, EquipmentRepo, RequestRepo, WorkCenterRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/requests
///
/// List all requests with their technician sets.
pub async fn list_requests(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = RequestRepo::list(&state.pool).await?;

    // Pre-fetch all assignments to avoid N+1 queries.
    let assignments = RequestRepo::assignments(&state.pool).await?;

    let responses: Vec<RequestResponse> = requests
        .into_iter()
        .map(|request| {
            let technician_ids = assignments
                .iter()
                .filter(|(request_id, _)| *request_id == request.id)
                .map(|(_, technician_id)| *technician_id)
                .collect();
            RequestResponse {
                request,
                technician_ids,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/requests/{id}
pub async fn get_request(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;
    let technician_ids = RequestRepo::technician_ids(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: RequestResponse {
            request,
            technician_ids,
        },
    }))
}

/// POST /api/v1/requests
///
/// Create a request. `created_by` is always the authenticated user. When the
/// target is equipment, its configured default team overrides the payload and
/// its default technician seeds both assignment channels (unless the client
/// already specified technicians).
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.subject.trim().is_empty() {
        return Err(AppError::BadRequest("subject must not be empty".into()));
    }
    RequestType::parse(&input.request_type).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid request_type '{}'. Must be one of: corrective, preventive",
            input.request_type
        ))
    })?;
    if let Some(priority) = &input.priority {
        Priority::parse(priority).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid priority '{priority}'. Must be one of: low, medium, high"
            ))
        })?;
    }

    if let Some(technician_ids) = &input.technician_ids {
        validate_unique_ids("technician_ids", technician_ids).map_err(AppError::Core)?;
    }

    // Exactly one target; equipment-derived defaults apply only to
    // equipment-targeted requests.
    let technician_ids = match (input.equipment_id, input.work_center_id) {
        (Some(equipment_id), None) => {
            let equipment = EquipmentRepo::find_by_id(&state.pool, equipment_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Equipment",
                    id: equipment_id,
                }))?;

            let assignment = apply_equipment_defaults(
                EquipmentDefaults {
                    maintenance_team_id: equipment.maintenance_team_id,
                    default_technician_id: equipment.default_technician_id,
                },
                input.maintenance_team_id,
                input.assigned_technician_id,
                input.technician_ids.as_deref(),
            );
            input.maintenance_team_id = assignment.maintenance_team_id;
            input.assigned_technician_id = assignment.assigned_technician_id;
            assignment.technician_ids
        }
        (None, Some(work_center_id)) => {
            WorkCenterRepo::find_by_id(&state.pool, work_center_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "WorkCenter",
                    id: work_center_id,
                }))?;
            input.technician_ids.clone().unwrap_or_default()
        }
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "A request targets either equipment or a work center, not both".into(),
            ));
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either equipment_id or work_center_id is required".into(),
            ));
        }
    };

    let request = RequestRepo::create(&state.pool, &input, auth.user_id, &technician_ids).await?;

    ActivityLogRepo::create(
        &state.pool,
        &CreateActivityLog {
            reference_type: REF_REQUEST,
            reference_id: request.id,
            action: "created".into(),
            performed_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(request_id = request.id, user_id = auth.user_id, "Request created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RequestResponse {
                request,
                technician_ids,
            },
        }),
    ))
}

/// PUT /api/v1/requests/{id}
///
/// Update a request. If the persisted status is `new` and the payload sets a
/// non-null `scheduled_date`, status is forced to `in_progress`. If the
/// effective status is `scrap` and the request references equipment, the
/// equipment is scrapped in the same transaction.
pub async fn update_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequest>,
) -> AppResult<impl IntoResponse> {
    let current = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    if let Some(request_type) = &input.request_type {
        RequestType::parse(request_type).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid request_type '{request_type}'. Must be one of: corrective, preventive"
            ))
        })?;
    }
    if let Some(priority) = &input.priority {
        Priority::parse(priority).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid priority '{priority}'. Must be one of: low, medium, high"
            ))
        })?;
    }
    let requested_status = input
        .status
        .as_deref()
        .map(|status| {
            RequestStatus::parse(status).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid status '{status}'. Must be one of: new, in_progress, repaired, scrap"
                ))
            })
        })
        .transpose()?;
    if let Some(technician_ids) = &input.technician_ids {
        validate_unique_ids("technician_ids", technician_ids).map_err(AppError::Core)?;
    }

    // The persisted status, not the payload, gates the auto-transition.
    let current_status = RequestStatus::parse(&current.status)
        .ok_or_else(|| AppError::InternalError(format!("Corrupt request status '{}'", current.status)))?;
    let effective = resolve_update_status(current_status, requested_status, input.scheduled_date);

    // Cascade against the post-update equipment reference.
    let effective_equipment_id = input.equipment_id.or(current.equipment_id);
    let scrap_equipment_id = if should_cascade_scrap(effective, effective_equipment_id) {
        effective_equipment_id
    } else {
        None
    };

    let request = RequestRepo::update(
        &state.pool,
        id,
        &input,
        effective.as_str(),
        input.technician_ids.as_deref(),
        scrap_equipment_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Request",
        id,
    }))?;

    let action = if current_status == effective {
        "updated".to_string()
    } else {
        format!("status changed from {} to {}", current_status.as_str(), effective.as_str())
    };
    ActivityLogRepo::create(
        &state.pool,
        &CreateActivityLog {
            reference_type: REF_REQUEST,
            reference_id: id,
            action,
            performed_by: auth.user_id,
        },
    )
    .await?;

    if let Some(equipment_id) = scrap_equipment_id {
        ActivityLogRepo::create(
            &state.pool,
            &CreateActivityLog {
                reference_type: REF_EQUIPMENT,
                reference_id: equipment_id,
                action: format!("scrapped via request {id}"),
                performed_by: auth.user_id,
            },
        )
        .await?;
    }

    let technician_ids = RequestRepo::technician_ids(&state.pool, id).await?;

    tracing::info!(
        request_id = id,
        user_id = auth.user_id,
        status = %request.status,
        "Request updated",
    );

    Ok(Json(DataResponse {
        data: RequestResponse {
            request,
            technician_ids,
        },
    }))
}
