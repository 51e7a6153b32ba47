//! External command execution.
//!
//! A small builder around `std::process::Command`, with optional PTY mode
//! for tools that only print colored output to a terminal.
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! let output = Cmd::from_slice(&["./upload", "rss.xml"])
//!     .cwd(root)
//!     .envs(&vars)
//!     .pty(true)
//!     .run()?;
//! ```

use portable_pty::{CommandBuilder, NativePtySystem, PtySize, PtySystem};
use std::{
    ffi::{OsStr, OsString},
    io::Read,
    path::{Path, PathBuf},
    process::Command,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pseudo-terminal error while running `{program}`: {message}")]
    Pty { program: String, message: String },
}

/// Result of a finished process.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub success: bool,
    /// Exit code, when the platform reports one.
    pub code: Option<i32>,
    /// All of stdout, then all of stderr.
    ///
    /// The two pipes are read separately, so lines are not interleaved in
    /// the order the program wrote them. In PTY mode both streams share the
    /// terminal and arrive in write order.
    pub output: String,
}

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    use_pty: bool,
}

impl Cmd {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Create from a command array (e.g., `["./upload"]` or `["netlify", "deploy"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        Self::new(program).args(iter)
    }

    /// Add multiple arguments. Empty arguments are dropped.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set environment variables for the subprocess.
    pub fn envs<K, V, I>(mut self, vars: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in vars {
            self.envs.push((k.as_ref().to_owned(), v.as_ref().to_owned()));
        }
        self
    }

    /// Run inside a pseudo-terminal.
    pub fn pty(mut self, enable: bool) -> Self {
        self.use_pty = enable;
        self
    }

    /// Program name for messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Execute and wait. A non-zero exit is reported in [`CmdOutput`], not
    /// as an error.
    pub fn run(self) -> Result<CmdOutput, ExecError> {
        if self.use_pty {
            self.run_with_pty()
        } else {
            self.run_simple()
        }
    }

    fn run_simple(self) -> Result<CmdOutput, ExecError> {
        let program = self.program_name();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(self.envs.iter().cloned());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|source| ExecError::Spawn { program, source })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CmdOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }

    fn run_with_pty(self) -> Result<CmdOutput, ExecError> {
        let program = self.program_name();
        let pty_error = |e: &dyn std::fmt::Display| ExecError::Pty {
            program: program.clone(),
            message: e.to_string(),
        };

        let mut cmd_builder = CommandBuilder::new(&self.program);
        cmd_builder.args(&self.args);
        for (k, v) in &self.envs {
            cmd_builder.env(k, v);
        }
        if let Some(dir) = &self.cwd {
            cmd_builder.cwd(dir);
        }

        let pty_system = NativePtySystem::default();
        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| pty_error(&e))?;

        let mut child = pair
            .slave
            .spawn_command(cmd_builder)
            .map_err(|e| pty_error(&e))?;
        drop(pair.slave);

        // PTY reads block until EOF, so drain on another thread
        let mut reader = pair.master.try_clone_reader().map_err(|e| pty_error(&e))?;
        let output_handle = std::thread::spawn(move || {
            let mut output = Vec::new();
            let _ = reader.read_to_end(&mut output);
            output
        });

        let status = child.wait().map_err(|e| pty_error(&e))?;
        drop(pair.master);

        let output = output_handle
            .join()
            .map_err(|_| pty_error(&"output reader thread panicked"))?;

        Ok(CmdOutput {
            success: status.success(),
            code: i32::try_from(status.exit_code()).ok(),
            output: String::from_utf8_lossy(&output).into_owned(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
