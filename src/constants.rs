//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// EXECUTION SANDBOX DEFAULTS
// =============================================================================

/// Default time limit for a submission in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: i32 = 5000;

/// Maximum time limit in milliseconds (to prevent abuse)
pub const MAX_TIME_LIMIT_MS: i32 = 30_000;

/// Default memory limit in kilobytes (128 MB)
pub const DEFAULT_MEMORY_LIMIT_KB: i32 = 128 * 1024;

/// Maximum memory limit in kilobytes (1 GB)
pub const MAX_MEMORY_LIMIT_KB: i32 = 1024 * 1024;

/// File size limit inside the sandbox in megabytes
pub const SANDBOX_FILE_SIZE_LIMIT_MB: u64 = 64;

/// CPU limit per container (number of cores)
pub const CPU_LIMIT: f64 = 1.0;

/// Maximum number of processes inside the sandbox
pub const SANDBOX_PIDS_LIMIT: i64 = 64;

/// Container image used to run Python submissions
pub const PYTHON_IMAGE: &str = "skillpath/python:latest";

/// Marker emitted on stderr by the in-container harness before its stats line
pub const EXECUTION_STATS_MARKER: &str = "__EXECUTION_STATS__:";

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const PYTHON: &str = "python";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[PYTHON];
}

// =============================================================================
// COURSE SETTINGS
// =============================================================================

/// Course and problem-set difficulty levels
pub mod difficulties {
    pub const BEGINNER: &str = "beginner";
    pub const INTERMEDIATE: &str = "intermediate";
    pub const ADVANCED: &str = "advanced";
    pub const EXPERT: &str = "expert";

    /// All supported difficulty levels
    pub const ALL: &[&str] = &[BEGINNER, INTERMEDIATE, ADVANCED, EXPERT];
}

/// Minimum course rating
pub const MIN_COURSE_RATING: f64 = 0.0;

/// Maximum course rating
pub const MAX_COURSE_RATING: f64 = 5.0;

/// Minimum completion rate (percentage)
pub const MIN_COMPLETION_RATE: f64 = 0.0;

/// Maximum completion rate (percentage)
pub const MAX_COMPLETION_RATE: f64 = 100.0;

/// Maximum number of tags on a course or problem set
pub const MAX_TAGS: usize = 16;

/// Maximum length of a single tag
pub const MAX_TAG_LENGTH: usize = 48;

// =============================================================================
// CONTEST SETTINGS
// =============================================================================

/// Contest visibility options
pub mod visibility {
    pub const PUBLIC: &str = "public";
    pub const PRIVATE: &str = "private";

    /// All supported visibility options
    pub const ALL: &[&str] = &[PUBLIC, PRIVATE];
}

/// Registration modes
pub mod registration_modes {
    pub const OPEN: &str = "open";
    pub const CLOSED: &str = "closed";
    pub const INVITE_ONLY: &str = "invite_only";

    /// All supported registration modes
    pub const ALL: &[&str] = &[OPEN, CLOSED, INVITE_ONLY];
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const INSTRUCTOR: &str = "instructor";
    pub const STUDENT: &str = "student";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, INSTRUCTOR, STUDENT];
}

// =============================================================================
// ENROLLMENT STATUSES
// =============================================================================

/// Enrollment status identifiers
pub mod enrollment_statuses {
    pub const ACTIVE: &str = "active";
    pub const COMPLETED: &str = "completed";
    pub const DROPPED: &str = "dropped";

    /// All enrollment statuses
    pub const ALL: &[&str] = &[ACTIVE, COMPLETED, DROPPED];
}

/// Enrollment target kinds
pub mod enrollment_targets {
    pub const COURSE: &str = "course";
    pub const PROBLEM_SET: &str = "problem_set";

    /// All enrollment target kinds
    pub const ALL: &[&str] = &[COURSE, PROBLEM_SET];
}

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission status identifiers
pub mod submission_statuses {
    pub const PENDING: &str = "pending";
    pub const RUNNING: &str = "running";
    pub const PASSED: &str = "passed";
    pub const FAILED: &str = "failed";
    pub const TIME_LIMIT_EXCEEDED: &str = "time_limit_exceeded";
    pub const MEMORY_LIMIT_EXCEEDED: &str = "memory_limit_exceeded";
    pub const RUNTIME_ERROR: &str = "runtime_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 5;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Submission endpoint - max requests
    pub const SUBMISSION_MAX_REQUESTS: i64 = 10;
    /// Submission endpoint - window in seconds
    pub const SUBMISSION_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// MAINTENANCE MODE
// =============================================================================

/// Redis key holding the maintenance-mode flag
pub const MAINTENANCE_FLAG_KEY: &str = "maintenance:enabled";

/// Redis key holding the optional maintenance message
pub const MAINTENANCE_MESSAGE_KEY: &str = "maintenance:message";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum course title length
pub const MAX_COURSE_TITLE_LENGTH: u64 = 256;

/// Maximum course description length
pub const MAX_COURSE_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum problem-set title length
pub const MAX_PROBLEM_SET_TITLE_LENGTH: u64 = 256;

/// Maximum problem statement length
pub const MAX_PROBLEM_STATEMENT_LENGTH: u64 = 65535;

/// Maximum contest title length
pub const MAX_CONTEST_TITLE_LENGTH: u64 = 256;

/// Maximum source code size in bytes (256 KB)
pub const MAX_SOURCE_CODE_SIZE: usize = 256 * 1024;

/// Maximum slug length
pub const MAX_SLUG_LENGTH: u64 = 64;
