//! Gradle Build
//!
//! Assembles the wrapper command line for a build request and runs it from
//! the root project directory.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use ovrbuild_core::config::DEFAULT_ROOT_PROJECT_NAME;
use ovrbuild_core::BuildRequest;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::locate::{locate_gradle_wrapper, locate_project_root};
use crate::workdir::WorkingDir;
use crate::BuildError;

/// Result of one Gradle run
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl TaskOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Flags for `task`, in the order Gradle receives them
pub fn gradle_flags(request: &BuildRequest, task: &str) -> Vec<String> {
    let mut flags = vec![task.to_string()];
    let daemon = if request.use_daemon { "--daemon" } else { "--no-daemon" };
    flags.push(daemon.to_string());
    if let Some(flag) = request.log_level.gradle_flag() {
        flags.push(flag);
    }
    if request.profile {
        flags.push("--profile".to_string());
    }
    if request.disable_sig_check {
        flags.push("-Pdisable_sig_check".to_string());
    }
    if request.clear_logcat {
        flags.push("-Pclear_logcat".to_string());
    }
    flags
}

/// How a failed Gradle run is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The root project has no such task: nothing to build here
    NoSource,
    BuildFailed,
}

/// Message Gradle prints when the root project lacks `task`
pub fn task_not_found_marker(task: &str, root_project_name: &str) -> String {
    format!("Task '{}' not found in root project '{}'", task, root_project_name)
}

/// Classify a non-zero Gradle exit from its stderr.
///
/// This substring match is the only coupling to Gradle's message format.
pub fn classify_failure(stderr: &str, task: &str, root_project_name: &str) -> FailureKind {
    if stderr.contains(&task_not_found_marker(task, root_project_name)) {
        FailureKind::NoSource
    } else {
        FailureKind::BuildFailed
    }
}

/// Echo `reader` to stdout as lines arrive and return everything read
async fn echo_lines<R: AsyncRead + Unpin>(reader: Option<R>) -> io::Result<String> {
    let mut collected = String::new();
    let Some(reader) = reader else {
        return Ok(collected);
    };
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    while reader.read_until(b'\n', &mut line).await? > 0 {
        let text = String::from_utf8_lossy(&line);
        print!("{}", text);
        collected.push_str(&text);
        line.clear();
    }
    Ok(collected)
}

async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> io::Result<String> {
    let mut bytes = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut bytes).await?;
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A fully assembled wrapper command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleInvocation {
    program: PathBuf,
    args: Vec<String>,
}

impl GradleInvocation {
    pub fn new(
        program: PathBuf,
        request: &BuildRequest,
        task: &str,
        extra_args: &[String],
    ) -> Self {
        let mut args = gradle_flags(request, task);
        args.extend(extra_args.iter().cloned());
        Self { program, args }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Password properties are masked
impl fmt::Display for GradleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            match arg.split_once('=') {
                Some((key, _)) if key.starts_with("-P") && key.ends_with(".password") => {
                    write!(f, " {}=****", key)?
                }
                _ => write!(f, " {}", arg)?,
            }
        }
        Ok(())
    }
}

/// Runs Gradle tasks for a build request
#[derive(Debug, Clone)]
pub struct GradleRunner {
    root_project_name: String,
    env_vars: BTreeMap<String, String>,
    suppress_errors: bool,
}

impl Default for GradleRunner {
    fn default() -> Self {
        Self {
            root_project_name: DEFAULT_ROOT_PROJECT_NAME.to_string(),
            env_vars: BTreeMap::new(),
            suppress_errors: false,
        }
    }
}

impl GradleRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root project name used to recognise a missing task
    pub fn with_root_project_name(mut self, name: impl Into<String>) -> Self {
        self.root_project_name = name.into();
        self
    }

    /// Set an environment variable for the Gradle process
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Log failed builds and return their output instead of failing
    pub fn suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    pub fn root_project_name(&self) -> &str {
        &self.root_project_name
    }

    /// Run `task` from the root project above the current directory.
    ///
    /// The working directory is the root project while Gradle runs and is
    /// restored afterwards whatever the outcome.
    pub async fn run_task(
        &self,
        request: &BuildRequest,
        task: &str,
        extra_args: &[String],
    ) -> Result<TaskOutput, BuildError> {
        let root = locate_project_root(&std::env::current_dir()?)?;
        let _cwd = WorkingDir::enter(&root)?;

        let wrapper = locate_gradle_wrapper(&root)?;
        let invocation = GradleInvocation::new(wrapper, request, task, extra_args);
        println!("{}", invocation);

        let mut cmd = invocation.command();
        cmd.envs(&self.env_vars)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let start = Instant::now();
        let mut child = cmd.spawn()?;
        // stderr is held back for failure classification
        let (stdout, stderr) =
            tokio::try_join!(echo_lines(child.stdout.take()), read_all(child.stderr.take()))?;
        let status = child.wait().await?;
        let elapsed = start.elapsed();

        let result = TaskOutput {
            code: status.code().unwrap_or(-1),
            stdout,
            stderr,
            elapsed,
        };

        if !result.success() {
            // Classified against the build kind's task, not `task`
            let expected = request.kind.task_name();
            if classify_failure(&result.stderr, expected, &self.root_project_name)
                == FailureKind::NoSource
            {
                debug!("{} has no task {}", root.display(), expected);
                return Err(BuildError::NoSource { dir: root });
            }

            eprint!("{}", result.stderr);
            let err = BuildError::BuildFailed {
                command: invocation.to_string(),
                code: result.code,
            };
            if !self.suppress_errors {
                return Err(err);
            }
            warn!("{}", err);
        }

        println!("Gradle took {:.6} seconds", elapsed.as_secs_f64());
        Ok(result)
    }
}
