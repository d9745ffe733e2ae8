//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Fields where "set to null" and "omitted" mean different things (equipment
//! `scrap_date`, request `scheduled_date`) use `Option<Option<T>>` with the
//! [`double_option`] deserializer: the outer `Option` is presence in the
//! payload, the inner is the value.

use serde::{Deserialize, Deserializer};

pub mod activity_log;
pub mod category;
pub mod department;
pub mod equipment;
pub mod request;
pub mod session;
pub mod team;
pub mod user;
pub mod work_center;
pub mod worksheet;

/// Deserialize a nullable field into `Some(value)` when present, so a
/// `#[serde(default)]` outer `None` means "field absent from the payload".
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
