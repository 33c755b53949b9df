//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod department_repo;
pub mod file_repo;
pub mod notification_repo;
pub mod regulation_repo;
pub mod subject_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use file_repo::FileRepo;
pub use notification_repo::NotificationRepo;
pub use regulation_repo::RegulationRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
