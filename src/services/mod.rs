pub mod admin_service;
pub mod auth_service;
pub mod hr_service;
pub mod resume_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use hr_service::HrService;
pub use resume_service::{ResumeFile, ResumeService};
pub use user_service::UserService;
