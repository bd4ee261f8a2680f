//! External solver invocation.
//!
//! `SolverRunner` is the seam consumed by orchestration. `MinizincRunner`
//! spawns the MiniZinc driver, drains its pipes on reader threads, and kills
//! the child once the timeout elapses.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::config::SolverConfig;
use crate::constants::{DEFAULT_SOLVER_BINARY, SIZE_PARAMETER};
use crate::error::StsError;
use crate::size::ProblemSize;

/// Interval between exit checks once both pipes have closed.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Raw outcome of one solver process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRun {
    /// Captured stdout, empty on timeout.
    pub stdout: String,
    /// Captured stderr, empty on timeout.
    pub stderr: String,
    /// Wall-clock time in whole seconds, floored.
    pub elapsed_secs: u64,
    /// Whether the process was killed at the deadline.
    pub timed_out: bool,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

impl RawRun {
    /// A run that hit the deadline.
    #[must_use]
    pub fn timed_out(elapsed_secs: u64) -> Self {
        Self {
            elapsed_secs,
            timed_out: true,
            ..Self::default()
        }
    }
}

/// Runs one configuration at one problem size.
pub trait SolverRunner {
    /// Invoke the solver and block until it exits or `timeout` elapses.
    fn run(
        &self,
        config: &SolverConfig,
        n: ProblemSize,
        timeout: Duration,
    ) -> Result<RawRun, StsError>;
}

/// Runner backed by the `minizinc` command-line driver.
#[derive(Debug, Clone)]
pub struct MinizincRunner {
    binary: PathBuf,
}

impl MinizincRunner {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments selecting the solver, binding `n`, and requesting a JSON stream.
    #[must_use]
    pub fn command_args(config: &SolverConfig, n: ProblemSize) -> Vec<OsString> {
        vec![
            "--solver".into(),
            config.solver.clone().into(),
            "-D".into(),
            format!("{SIZE_PARAMETER}={n}").into(),
            "--json-stream".into(),
            config.model.clone().into_os_string(),
        ]
    }

    fn spawn(&self, config: &SolverConfig, n: ProblemSize) -> Result<Child, StsError> {
        let args = Self::command_args(config, n);
        tracing::debug!(binary = %self.binary.display(), ?args, "spawning solver");
        Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| StsError::Launch {
                binary: self.binary.display().to_string(),
                source,
            })
    }
}

impl Default for MinizincRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_BINARY)
    }
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

type PipeMessage = (Pipe, std::io::Result<Vec<u8>>);

fn spawn_reader<R: Read + Send + 'static>(pipe: Pipe, mut reader: R, tx: Sender<PipeMessage>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        // The receiver is gone once the run timed out.
        let _ = tx.send((pipe, result));
    });
}

fn kill_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!("kill after timeout failed: {e}");
    }
    if let Err(e) = child.wait() {
        tracing::debug!("reaping killed solver failed: {e}");
    }
}

/// Collect both pipes, or `None` if the deadline passes first.
///
/// A `None` deadline waits until both pipes close.
fn collect_pipes(
    rx: &Receiver<PipeMessage>,
    deadline: Option<Instant>,
) -> Result<Option<(Vec<u8>, Vec<u8>)>, StsError> {
    let mut stdout = None;
    let mut stderr = None;
    while stdout.is_none() || stderr.is_none() {
        let message = match deadline {
            Some(deadline) => rx.recv_deadline(deadline),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match message {
            Ok((Pipe::Stdout, bytes)) => stdout = Some(bytes?),
            Ok((Pipe::Stderr, bytes)) => stderr = Some(bytes?),
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(Some((stdout.unwrap_or_default(), stderr.unwrap_or_default())))
}

impl SolverRunner for MinizincRunner {
    fn run(
        &self,
        config: &SolverConfig,
        n: ProblemSize,
        timeout: Duration,
    ) -> Result<RawRun, StsError> {
        let start = Instant::now();
        // Timeouts too large to represent never expire.
        let deadline = start.checked_add(timeout);
        let mut child = self.spawn(config, n)?;

        let (tx, rx) = crossbeam_channel::bounded::<PipeMessage>(2);
        if let Some(out) = child.stdout.take() {
            spawn_reader(Pipe::Stdout, out, tx.clone());
        }
        if let Some(err) = child.stderr.take() {
            spawn_reader(Pipe::Stderr, err, tx);
        }

        let pipes = match collect_pipes(&rx, deadline) {
            Ok(pipes) => pipes,
            Err(e) => {
                kill_child(&mut child);
                return Err(e);
            }
        };
        let Some((stdout, stderr)) = pipes else {
            kill_child(&mut child);
            tracing::warn!(solver = %config.solver, %n, "solver timed out after {timeout:?}");
            return Ok(RawRun::timed_out(start.elapsed().as_secs()));
        };

        // Pipes are closed; the child is exiting or has exited.
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                kill_child(&mut child);
                tracing::warn!(solver = %config.solver, %n, "solver timed out after {timeout:?}");
                return Ok(RawRun::timed_out(start.elapsed().as_secs()));
            }
            thread::sleep(EXIT_POLL_INTERVAL);
        };

        let elapsed_secs = start.elapsed().as_secs();
        if !status.success() {
            tracing::debug!(solver = %config.solver, %n, ?status, "solver exited unsuccessfully");
        }
        Ok(RawRun {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            elapsed_secs,
            timed_out: false,
            exit_code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_bind_size_and_request_json_stream() {
        let config = SolverConfig::new("STS_model.mzn", "chuffed");
        let args = MinizincRunner::command_args(&config, ProblemSize::new(8).unwrap());
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec!["--solver", "chuffed", "-D", "n=8", "--json-stream", "STS_model.mzn"]
        );
    }

    #[test]
    fn default_binary_is_minizinc() {
        assert_eq!(MinizincRunner::default().binary(), Path::new("minizinc"));
    }

    #[test]
    fn missing_binary_is_launch_error() {
        let runner = MinizincRunner::new("/nonexistent/stsrun-solver");
        let config = SolverConfig::new("m.mzn", "gecode");
        let err = runner
            .run(&config, ProblemSize::new(2).unwrap(), Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, StsError::Launch { .. }));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn fake_solver(dir: &tempfile::TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("fake-minizinc");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn captures_stdout_and_args() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_solver(&dir, r#"echo "$@""#);
            let runner = MinizincRunner::new(bin);
            let config = SolverConfig::new("STS_model.mzn", "gecode");
            let raw = runner
                .run(&config, ProblemSize::new(4).unwrap(), Duration::from_secs(10))
                .unwrap();
            assert!(!raw.timed_out);
            assert_eq!(raw.exit_code, Some(0));
            assert_eq!(
                raw.stdout.trim(),
                "--solver gecode -D n=4 --json-stream STS_model.mzn"
            );
        }

        #[test]
        fn captures_stderr_and_exit_code() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_solver(&dir, "echo 'model not found' >&2\nexit 1");
            let runner = MinizincRunner::new(bin);
            let config = SolverConfig::new("missing.mzn", "gecode");
            let raw = runner
                .run(&config, ProblemSize::new(2).unwrap(), Duration::from_secs(10))
                .unwrap();
            assert!(raw.stdout.is_empty());
            assert_eq!(raw.stderr.trim(), "model not found");
            assert_eq!(raw.exit_code, Some(1));
        }

        #[test]
        fn kills_at_deadline() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_solver(&dir, "echo partial\nexec sleep 30");
            let runner = MinizincRunner::new(bin);
            let config = SolverConfig::new("STS_model.mzn", "gecode");
            let start = Instant::now();
            let raw = runner
                .run(&config, ProblemSize::new(2).unwrap(), Duration::from_millis(300))
                .unwrap();
            assert!(raw.timed_out);
            assert!(raw.stdout.is_empty());
            assert!(start.elapsed() < Duration::from_secs(10));
        }

        #[test]
        fn kills_at_deadline_after_pipes_close() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_solver(&dir, "exec 1>&- 2>&-\nexec sleep 30");
            let runner = MinizincRunner::new(bin);
            let config = SolverConfig::new("STS_model.mzn", "gecode");
            let start = Instant::now();
            let raw = runner
                .run(&config, ProblemSize::new(2).unwrap(), Duration::from_millis(300))
                .unwrap();
            assert!(raw.timed_out);
            assert!(start.elapsed() < Duration::from_secs(10));
        }

        #[test]
        fn unrepresentable_timeout_never_expires() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_solver(&dir, "echo hi");
            let runner = MinizincRunner::new(bin);
            let config = SolverConfig::new("STS_model.mzn", "gecode");
            let raw = runner
                .run(&config, ProblemSize::new(2).unwrap(), Duration::from_secs(u64::MAX))
                .unwrap();
            assert!(!raw.timed_out);
            assert_eq!(raw.stdout.trim(), "hi");
            assert_eq!(raw.exit_code, Some(0));
        }
    }
}
