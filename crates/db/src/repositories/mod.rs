//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must keep
//! multiple writes consistent (join-table replacement, the request->equipment
//! scrap cascade) open a transaction internally so callers keep the plain
//! `&PgPool` signature.

pub mod activity_log_repo;
pub mod category_repo;
pub mod dashboard_repo;
pub mod department_repo;
pub mod equipment_repo;
pub mod request_repo;
pub mod session_repo;
pub mod team_repo;
pub mod user_repo;
pub mod work_center_repo;
pub mod worksheet_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use department_repo::DepartmentRepo;
pub use equipment_repo::EquipmentRepo;
pub use request_repo::RequestRepo;
pub use session_repo::SessionRepo;
pub use team_repo::TeamRepo;
pub use user_repo::UserRepo;
pub use work_center_repo::WorkCenterRepo;
pub use worksheet_repo::WorksheetRepo;
