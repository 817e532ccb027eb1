//! Submission execution sandbox
//!
//! Submissions run inside locked-down Docker containers: capped memory,
//! one CPU, no network, a bounded process count, and a wall-clock timeout.
//! The runner collects runtime and peak memory for each run and turns the
//! outcome into a submission status.

pub mod container;
pub mod runner;

pub use container::ContainerManager;
pub use runner::{ExecutionOutcome, PythonRunner};
