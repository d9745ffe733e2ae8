//! Maintenance-request lifecycle rules and the equipment scrap derivation.
//!
//! These are the derived-field rules applied on top of whatever the client
//! submitted: equipment defaults at request creation, the automatic
//! new -> in_progress transition when a request gets scheduled, the scrap
//! cascade decision, and the status/scrap_date consistency rule for
//! equipment. All functions are pure; the API layer feeds them current
//! persisted state plus the incoming payload and persists what comes back.

use crate::error::CoreError;
use crate::status::{EquipmentStatus, RequestStatus};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Equipment status derivation
// ---------------------------------------------------------------------------

/// Derive equipment status from the presence of a scrap date.
///
/// The invariant `status == scrapped <=> scrap_date != null` is enforced at
/// the application layer; every write that touches either field recomputes
/// status through this function.
pub fn derive_equipment_status(scrap_date: Option<Timestamp>) -> EquipmentStatus {
    if scrap_date.is_some() {
        EquipmentStatus::Scrapped
    } else {
        EquipmentStatus::Active
    }
}

// ---------------------------------------------------------------------------
// Request creation defaults
// ---------------------------------------------------------------------------

/// Default assignment configuration carried on an equipment record.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentDefaults {
    pub maintenance_team_id: Option<DbId>,
    pub default_technician_id: Option<DbId>,
}

/// Effective team/technician assignment for a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAssignment {
    pub maintenance_team_id: Option<DbId>,
    pub assigned_technician_id: Option<DbId>,
    pub technician_ids: Vec<DbId>,
}

/// Compute the team/technician assignment for a request being created
/// against a piece of equipment.
///
/// - A configured default maintenance team overrides any client-supplied
///   team.
/// - A configured default technician becomes both the assigned technician
///   and the sole member of the technician set, but only when the client
///   supplied no technician through either channel.
///
/// Requests targeting a work center never reach this function; no
/// equipment-derived defaults apply there.
pub fn apply_equipment_defaults(
    defaults: EquipmentDefaults,
    requested_team_id: Option<DbId>,
    requested_technician_id: Option<DbId>,
    requested_technician_ids: Option<&[DbId]>,
) -> RequestAssignment {
    let maintenance_team_id = defaults.maintenance_team_id.or(requested_team_id);

    let client_specified_technicians = requested_technician_id.is_some()
        || requested_technician_ids.is_some_and(|ids| !ids.is_empty());

    let (assigned_technician_id, technician_ids) = match defaults.default_technician_id {
        Some(default_tech) if !client_specified_technicians => (Some(default_tech), vec![default_tech]),
        _ => (
            requested_technician_id,
            requested_technician_ids.map(<[DbId]>::to_vec).unwrap_or_default(),
        ),
    };

    RequestAssignment {
        maintenance_team_id,
        assigned_technician_id,
        technician_ids,
    }
}

// ---------------------------------------------------------------------------
// Status transitions on update
// ---------------------------------------------------------------------------

/// Resolve the effective status for a request update.
///
/// `scheduled_date_change` is the tri-state payload field: `None` means the
/// client omitted it, `Some(None)` clears the date, `Some(Some(_))` sets it.
///
/// The auto-transition fires only from `new` and only when a non-null
/// scheduled date is being set; it overrides any status the client supplied.
/// In every other case the client's status (or, absent that, the persisted
/// status) stands.
pub fn resolve_update_status(
    current: RequestStatus,
    requested: Option<RequestStatus>,
    scheduled_date_change: Option<Option<Timestamp>>,
) -> RequestStatus {
    if current == RequestStatus::New && matches!(scheduled_date_change, Some(Some(_))) {
        return RequestStatus::InProgress;
    }
    requested.unwrap_or(current)
}

/// Whether a request update must cascade a scrap to its equipment.
///
/// True when the effective status is `scrap` and the request references
/// equipment (work-center-targeted requests have nothing to cascade to).
pub fn should_cascade_scrap(effective: RequestStatus, equipment_id: Option<DbId>) -> bool {
    effective == RequestStatus::Scrap && equipment_id.is_some()
}

// ---------------------------------------------------------------------------
// Id-set validation
// ---------------------------------------------------------------------------

/// Reject duplicate ids in a member/technician replacement set.
///
/// Join-table replacement inserts one row per id, so duplicates would
/// silently produce duplicate rows; they are treated as client error instead.
pub fn validate_unique_ids(field: &str, ids: &[DbId]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "{field} contains duplicate id {id}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    // -- equipment status derivation --

    #[test]
    fn scrap_date_present_means_scrapped() {
        assert_eq!(derive_equipment_status(Some(ts())), EquipmentStatus::Scrapped);
    }

    #[test]
    fn scrap_date_absent_means_active() {
        assert_eq!(derive_equipment_status(None), EquipmentStatus::Active);
    }

    // -- creation defaults --

    #[test]
    fn default_team_overrides_client_team() {
        let assignment = apply_equipment_defaults(
            EquipmentDefaults {
                maintenance_team_id: Some(2),
                default_technician_id: None,
            },
            Some(9),
            None,
            None,
        );
        assert_eq!(assignment.maintenance_team_id, Some(2));
    }

    #[test]
    fn client_team_kept_when_equipment_has_no_default() {
        let assignment = apply_equipment_defaults(EquipmentDefaults::default(), Some(9), None, None);
        assert_eq!(assignment.maintenance_team_id, Some(9));
    }

    #[test]
    fn default_technician_seeds_both_channels() {
        let assignment = apply_equipment_defaults(
            EquipmentDefaults {
                maintenance_team_id: Some(2),
                default_technician_id: Some(7),
            },
            None,
            None,
            None,
        );
        assert_eq!(assignment.assigned_technician_id, Some(7));
        assert_eq!(assignment.technician_ids, vec![7]);
    }

    #[test]
    fn client_technicians_suppress_default() {
        let assignment = apply_equipment_defaults(
            EquipmentDefaults {
                maintenance_team_id: None,
                default_technician_id: Some(7),
            },
            None,
            None,
            Some(&[3, 5]),
        );
        assert_eq!(assignment.assigned_technician_id, None);
        assert_eq!(assignment.technician_ids, vec![3, 5]);
    }

    #[test]
    fn client_single_technician_suppresses_default() {
        let assignment = apply_equipment_defaults(
            EquipmentDefaults {
                maintenance_team_id: None,
                default_technician_id: Some(7),
            },
            None,
            Some(4),
            None,
        );
        assert_eq!(assignment.assigned_technician_id, Some(4));
        assert!(assignment.technician_ids.is_empty());
    }

    #[test]
    fn empty_technician_array_does_not_suppress_default() {
        // An empty array is "no technicians specified", so the default seeds.
        let assignment = apply_equipment_defaults(
            EquipmentDefaults {
                maintenance_team_id: None,
                default_technician_id: Some(7),
            },
            None,
            None,
            Some(&[]),
        );
        assert_eq!(assignment.assigned_technician_id, Some(7));
        assert_eq!(assignment.technician_ids, vec![7]);
    }

    // -- update status resolution --

    #[test]
    fn scheduling_a_new_request_forces_in_progress() {
        let status = resolve_update_status(RequestStatus::New, None, Some(Some(ts())));
        assert_eq!(status, RequestStatus::InProgress);
    }

    #[test]
    fn scheduling_overrides_client_status() {
        let status =
            resolve_update_status(RequestStatus::New, Some(RequestStatus::New), Some(Some(ts())));
        assert_eq!(status, RequestStatus::InProgress);
    }

    #[test]
    fn scheduling_does_not_fire_from_in_progress() {
        let status = resolve_update_status(RequestStatus::InProgress, None, Some(Some(ts())));
        assert_eq!(status, RequestStatus::InProgress);

        let status = resolve_update_status(RequestStatus::Repaired, None, Some(Some(ts())));
        assert_eq!(status, RequestStatus::Repaired);
    }

    #[test]
    fn clearing_the_date_does_not_fire() {
        let status = resolve_update_status(RequestStatus::New, None, Some(None));
        assert_eq!(status, RequestStatus::New);
    }

    #[test]
    fn omitted_date_leaves_client_status_in_charge() {
        let status = resolve_update_status(RequestStatus::New, Some(RequestStatus::Repaired), None);
        assert_eq!(status, RequestStatus::Repaired);

        let status = resolve_update_status(RequestStatus::InProgress, None, None);
        assert_eq!(status, RequestStatus::InProgress);
    }

    // -- scrap cascade --

    #[test]
    fn scrap_with_equipment_cascades() {
        assert!(should_cascade_scrap(RequestStatus::Scrap, Some(1)));
    }

    #[test]
    fn scrap_without_equipment_does_not_cascade() {
        assert!(!should_cascade_scrap(RequestStatus::Scrap, None));
    }

    #[test]
    fn non_scrap_never_cascades() {
        assert!(!should_cascade_scrap(RequestStatus::Repaired, Some(1)));
    }

    // -- id-set validation --

    #[test]
    fn duplicate_ids_rejected() {
        let err = validate_unique_ids("technician_ids", &[3, 5, 3]).unwrap_err();
        assert!(err.to_string().contains("technician_ids"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn unique_and_empty_sets_accepted() {
        assert!(validate_unique_ids("member_ids", &[1, 2, 3]).is_ok());
        assert!(validate_unique_ids("member_ids", &[]).is_ok());
    }
}
