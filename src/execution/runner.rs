//! Python submission runner

use bollard::Docker;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::EXECUTION_STATS_MARKER,
    error::AppResult,
    models::{ProblemInstance, SubmissionStatus},
};

use super::container::ContainerManager;

/// Terminal outcome of executing one submission
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub status: SubmissionStatus,
    pub runtime_ms: Option<f64>,
    pub memory_kb: Option<i64>,
    pub output: Option<String>,
    pub error_message: Option<String>,
}

/// Runs Python submissions in the sandbox and grades them
pub struct PythonRunner {
    containers: ContainerManager,
}

impl PythonRunner {
    /// Create a new runner
    pub fn new(docker: Docker, config: Config) -> Self {
        Self {
            containers: ContainerManager::new(docker, config),
        }
    }

    /// Execute a submission against its problem instance.
    ///
    /// The container is always removed, including on error paths.
    pub async fn run(
        &self,
        submission_id: &Uuid,
        source_code: &str,
        problem: &ProblemInstance,
    ) -> AppResult<ExecutionOutcome> {
        let container_id = self
            .containers
            .create_container(submission_id, problem.memory_limit_kb)
            .await?;

        let outcome = self.run_inner(&container_id, source_code, problem).await;

        if let Err(e) = self.containers.remove_container(&container_id).await {
            tracing::warn!(submission_id = %submission_id, error = %e, "Failed to remove sandbox container");
        }

        outcome
    }

    async fn run_inner(
        &self,
        container_id: &str,
        source_code: &str,
        problem: &ProblemInstance,
    ) -> AppResult<ExecutionOutcome> {
        self.containers
            .write_file(container_id, "/workspace/solution.py", source_code)
            .await?;

        let cmd = if let Some(input) = &problem.sample_input {
            self.containers
                .write_file(container_id, "/workspace/input.txt", input)
                .await?;
            "python3 /workspace/solution.py < /workspace/input.txt"
        } else {
            "python3 /workspace/solution.py"
        };

        let run = self
            .containers
            .run_measured(container_id, cmd, problem.time_limit_ms)
            .await?;

        // The container harness may report its own stats line; prefer it
        // over the wall clock when present.
        let (clean_output, harness_runtime) = strip_stats_marker(&run.stdout);
        let runtime_ms = harness_runtime.unwrap_or(run.wall_time_ms);

        if run.exit_code == 124 {
            return Ok(ExecutionOutcome {
                status: SubmissionStatus::TimeLimitExceeded,
                runtime_ms: Some(runtime_ms),
                memory_kb: Some(run.memory_kb),
                output: None,
                error_message: Some("Execution timed out".to_string()),
            });
        }

        // 137 = SIGKILL, what the cgroup OOM killer delivers
        if run.exit_code == 137 || run.memory_kb > i64::from(problem.memory_limit_kb) {
            return Ok(ExecutionOutcome {
                status: SubmissionStatus::MemoryLimitExceeded,
                runtime_ms: Some(runtime_ms),
                memory_kb: Some(run.memory_kb),
                output: None,
                error_message: Some("Memory limit exceeded".to_string()),
            });
        }

        if run.exit_code != 0 {
            return Ok(ExecutionOutcome {
                status: SubmissionStatus::RuntimeError,
                runtime_ms: Some(runtime_ms),
                memory_kb: Some(run.memory_kb),
                output: Some(truncate(&clean_output, 8192)),
                error_message: run.stderr.map(|s| truncate(&s, 8192)),
            });
        }

        let status = match &problem.expected_output {
            Some(expected) => {
                if outputs_match(&clean_output, expected) {
                    SubmissionStatus::Passed
                } else {
                    SubmissionStatus::Failed
                }
            }
            // Nothing to grade against: a clean run passes
            None => SubmissionStatus::Passed,
        };

        Ok(ExecutionOutcome {
            status,
            runtime_ms: Some(runtime_ms),
            memory_kb: Some(run.memory_kb),
            output: Some(truncate(&clean_output, 8192)),
            error_message: None,
        })
    }
}

/// Compare program output to the expected output, ignoring trailing
/// whitespace per line and trailing newlines
fn outputs_match(actual: &str, expected: &str) -> bool {
    let normalize = |s: &str| {
        s.lines()
            .map(|l| l.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
            .trim_end()
            .to_string()
    };
    normalize(actual) == normalize(expected)
}

/// Remove the harness stats line from output and extract its runtime.
///
/// The in-container harness appends a line of the form
/// `__EXECUTION_STATS__:{'runtime_ms': 42, ...}` after the program output.
fn strip_stats_marker(output: &str) -> (String, Option<f64>) {
    let mut runtime = None;
    let clean: Vec<&str> = output
        .lines()
        .filter(|line| {
            if let Some(rest) = line.trim_start().strip_prefix(EXECUTION_STATS_MARKER) {
                runtime = parse_runtime_ms(rest);
                false
            } else {
                true
            }
        })
        .collect();

    (clean.join("\n"), runtime)
}

/// Pull `runtime_ms` out of the harness stats payload
fn parse_runtime_ms(payload: &str) -> Option<f64> {
    let idx = payload.find("runtime_ms")?;
    let rest = &payload[idx + "runtime_ms".len()..];
    let digits: String = rest
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// Truncate long program output before persisting it
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_match_ignores_trailing_whitespace() {
        assert!(outputs_match("1 2 3\n", "1 2 3"));
        assert!(outputs_match("a  \nb\n\n", "a\nb"));
        assert!(!outputs_match("1 2", "1 2 3"));
    }

    #[test]
    fn test_strip_stats_marker() {
        let output = "hello\n__EXECUTION_STATS__:{'runtime_ms': 42, 'memory_bytes': 1024, 'success': True}\n";
        let (clean, runtime) = strip_stats_marker(output);
        assert_eq!(clean, "hello");
        assert_eq!(runtime, Some(42.0));
    }

    #[test]
    fn test_strip_stats_marker_absent() {
        let (clean, runtime) = strip_stats_marker("plain output");
        assert_eq!(clean, "plain output");
        assert_eq!(runtime, None);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "héllo wörld";
        let t = truncate(s, 3);
        assert!(t.starts_with("hé") || t.starts_with("h"));
        assert!(t.ends_with('…'));
        assert_eq!(truncate("short", 100), "short");
    }
}
