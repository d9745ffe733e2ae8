//! Status and classification enums stored as TEXT in the database.
//!
//! Each enum's wire value matches the CHECK constraint in the corresponding
//! migration. `as_str` produces the stored value; `parse` accepts it back and
//! returns `None` for anything unknown so callers can surface a validation
//! error instead of panicking.

use serde::{Deserialize, Serialize};

/// Equipment lifecycle status. Derived from `scrap_date` presence, never
/// independently authoritative (see [`crate::lifecycle::derive_equipment_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    Scrapped,
}

impl EquipmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Scrapped => "scrapped",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "scrapped" => Some(Self::Scrapped),
            _ => None,
        }
    }
}

/// Maintenance request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InProgress,
    Repaired,
    Scrap,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Repaired => "repaired",
            Self::Scrap => "scrap",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "in_progress" => Some(Self::InProgress),
            "repaired" => Some(Self::Repaired),
            "scrap" => Some(Self::Scrap),
            _ => None,
        }
    }
}

/// Maintenance request priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Whether a request fixes a fault or performs planned upkeep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl RequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corrective => "corrective",
            Self::Preventive => "preventive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "corrective" => Some(Self::Corrective),
            "preventive" => Some(Self::Preventive),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_round_trips() {
        for status in [
            RequestStatus::New,
            RequestStatus::InProgress,
            RequestStatus::Repaired,
            RequestStatus::Scrap,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_values_parse_to_none() {
        assert_eq!(RequestStatus::parse("done"), None);
        assert_eq!(EquipmentStatus::parse(""), None);
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(RequestType::parse("routine"), None);
    }
}
