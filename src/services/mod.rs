//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod contest_service;
pub mod course_service;
pub mod enrollment_service;
pub mod execution_service;
pub mod problem_set_service;
pub mod submission_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use contest_service::ContestService;
pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use execution_service::ExecutionService;
pub use problem_set_service::ProblemSetService;
pub use submission_service::SubmissionService;
pub use user_service::UserService;
