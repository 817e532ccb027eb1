//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod contest_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod problem_set_repo;
pub mod submission_repo;
pub mod user_repo;

pub use contest_repo::ContestRepository;
pub use course_repo::CourseRepository;
pub use enrollment_repo::EnrollmentRepository;
pub use problem_set_repo::ProblemSetRepository;
pub use submission_repo::SubmissionRepository;
pub use user_repo::UserRepository;
