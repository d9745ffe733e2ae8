//! GearGuard core domain logic.
//!
//! Pure types and rules shared by the database and API layers: ID/timestamp
//! aliases, the domain error enum, status enums, the maintenance-request
//! lifecycle rules, and worksheet-hours aggregation. No I/O happens here.

pub mod error;
pub mod lifecycle;
pub mod roles;
pub mod status;
pub mod types;
pub mod worksheet;
