//! Docker container management for the submission sandbox

use bollard::{
    container::LogOutput,
    exec::{CreateExecOptions, StartExecResults},
    models::ContainerCreateBody,
    query_parameters::{CreateContainerOptionsBuilder, RemoveContainerOptionsBuilder},
    Docker,
};
use futures::StreamExt;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::{SANDBOX_FILE_SIZE_LIMIT_MB, SANDBOX_PIDS_LIMIT},
    error::AppResult,
};

/// Output of a single in-container command
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

/// Result of a measured run
#[derive(Debug)]
pub struct MeasuredRun {
    pub stdout: String,
    pub stderr: Option<String>,
    pub exit_code: i32,
    pub wall_time_ms: f64,
    pub memory_kb: i64,
}

/// Docker container manager for submission execution
pub struct ContainerManager {
    docker: Docker,
    config: Config,
}

impl ContainerManager {
    /// Create a new container manager
    pub fn new(docker: Docker, config: Config) -> Self {
        Self { docker, config }
    }

    /// Create and start a sandbox container for a submission
    pub async fn create_container(
        &self,
        submission_id: &Uuid,
        memory_limit_kb: i32,
    ) -> AppResult<String> {
        let container_name = format!("skillpath-{}", submission_id);

        let options = CreateContainerOptionsBuilder::default()
            .name(&container_name)
            .build();

        let memory_bytes = i64::from(memory_limit_kb) * 1024;
        let host_config = bollard::models::HostConfig {
            memory: Some(memory_bytes),
            memory_swap: Some(memory_bytes),
            cpu_period: Some(100_000),
            cpu_quota: Some((100_000.0 * self.config.execution.cpu_limit) as i64),
            network_mode: Some("none".to_string()),
            pids_limit: Some(SANDBOX_PIDS_LIMIT),
            readonly_rootfs: Some(false),
            ..Default::default()
        };

        let config = ContainerCreateBody {
            image: Some(self.config.docker.python_image.clone()),
            tty: Some(true),
            open_stdin: Some(true),
            host_config: Some(host_config),
            working_dir: Some("/workspace".to_string()),
            env: Some(vec!["LANG=C.UTF-8".to_string()]),
            labels: Some({
                let mut labels = HashMap::new();
                labels.insert("skillpath.submission".to_string(), submission_id.to_string());
                labels
            }),
            ..Default::default()
        };

        let container = self.docker.create_container(Some(options), config).await?;

        self.docker
            .start_container(&container.id, None::<bollard::query_parameters::StartContainerOptions>)
            .await?;

        Ok(container.id)
    }

    /// Remove a container
    pub async fn remove_container(&self, container_id: &str) -> AppResult<()> {
        let options = RemoveContainerOptionsBuilder::default()
            .force(true)
            .build();

        self.docker.remove_container(container_id, Some(options)).await?;

        Ok(())
    }

    /// Write a file into the container
    pub async fn write_file(&self, container_id: &str, path: &str, content: &str) -> AppResult<()> {
        // Use echo with base64 to handle special characters
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, content);
        let cmd = format!("echo '{}' | base64 -d > {}", encoded, path);

        self.exec_command(container_id, &cmd).await?;

        Ok(())
    }

    /// Run a measured command: wall-clock timeout, file-size cap, and
    /// /usr/bin/time -v metrics
    pub async fn run_measured(
        &self,
        container_id: &str,
        cmd: &str,
        time_limit_ms: i32,
    ) -> AppResult<MeasuredRun> {
        let timeout_secs = (f64::from(time_limit_ms) / 1000.0) + 0.5;
        let fsize_blocks = SANDBOX_FILE_SIZE_LIMIT_MB * 1024; // ulimit -f counts 1 KiB blocks
        let full_cmd = format!(
            "cd /workspace && ulimit -f {} && timeout {}s /usr/bin/time -v sh -c '{}' 2>&1",
            fsize_blocks,
            timeout_secs,
            cmd.replace('\'', "'\\''")
        );

        let start = std::time::Instant::now();
        let result = self.exec_command(container_id, &full_cmd).await?;
        let wall_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let (stdout, time_output) = split_time_output(&result.stdout);
        let memory_kb = parse_memory_usage(&time_output);

        // timeout(1) exits 124; also treat a blown wall clock as a timeout
        let exit_code = if result.exit_code == 124 || wall_time_ms > f64::from(time_limit_ms) + 500.0 {
            124
        } else {
            result.exit_code
        };

        Ok(MeasuredRun {
            stdout,
            stderr: result.stderr,
            exit_code,
            wall_time_ms,
            memory_kb,
        })
    }

    /// Execute a shell command in the container
    async fn exec_command(&self, container_id: &str, cmd: &str) -> AppResult<ExecResult> {
        let exec = self
            .docker
            .create_exec(
                container_id,
                CreateExecOptions {
                    cmd: Some(vec!["/bin/sh", "-c", cmd]),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    ..Default::default()
                },
            )
            .await?;

        let output = self.docker.start_exec(&exec.id, None).await?;

        let mut stdout = String::new();
        let mut stderr = String::new();

        if let StartExecResults::Attached { mut output, .. } = output {
            while let Some(msg) = output.next().await {
                match msg? {
                    LogOutput::StdOut { message } => {
                        stdout.push_str(&String::from_utf8_lossy(&message));
                    }
                    LogOutput::StdErr { message } => {
                        stderr.push_str(&String::from_utf8_lossy(&message));
                    }
                    _ => {}
                }
            }
        }

        let inspect = self.docker.inspect_exec(&exec.id).await?;
        let exit_code = inspect.exit_code.unwrap_or(-1) as i32;

        Ok(ExecResult {
            stdout,
            stderr: if stderr.is_empty() { None } else { Some(stderr) },
            exit_code,
        })
    }
}

/// Split program output from /usr/bin/time output
fn split_time_output(combined: &str) -> (String, String) {
    if let Some(idx) = combined.find("\tCommand being timed:") {
        let (stdout, time_part) = combined.split_at(idx);
        (stdout.to_string(), time_part.to_string())
    } else if let Some(idx) = combined.find("Command exited with non-zero status") {
        let (stdout, time_part) = combined.split_at(idx);
        (stdout.to_string(), time_part.to_string())
    } else {
        (combined.to_string(), String::new())
    }
}

/// Parse peak memory from /usr/bin/time -v output
fn parse_memory_usage(time_output: &str) -> i64 {
    for line in time_output.lines() {
        if line.contains("Maximum resident set size") {
            if let Some(kb_str) = line.split(':').nth(1) {
                if let Ok(kb) = kb_str.trim().parse::<i64>() {
                    return kb;
                }
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_time_output() {
        let combined = "program output\n\tCommand being timed: \"python3 solution.py\"\n\tMaximum resident set size (kbytes): 10240\n";
        let (stdout, time_part) = split_time_output(combined);
        assert_eq!(stdout, "program output\n");
        assert!(time_part.contains("Maximum resident set size"));
    }

    #[test]
    fn test_split_without_time_output() {
        let (stdout, time_part) = split_time_output("just output");
        assert_eq!(stdout, "just output");
        assert!(time_part.is_empty());
    }

    #[test]
    fn test_parse_memory_usage() {
        let time_output = "\tUser time (seconds): 0.12\n\tMaximum resident set size (kbytes): 20480\n";
        assert_eq!(parse_memory_usage(time_output), 20480);
        assert_eq!(parse_memory_usage("no stats here"), 0);
    }
}
