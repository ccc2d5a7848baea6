use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::env::CLASSPATH_VAR;

/// Conventional process exit code: 0 for success, anything else for failure.
pub type ExitCode = i32;

/// A fully assembled `java` invocation, kept as data until it is spawned.
///
/// Holding the invocation as a value lets callers inspect or log the exact
/// command line before anything runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaCommand {
    /// Resolved java executable.
    pub program: PathBuf,
    /// Everything after the program name, in order.
    pub args: Vec<OsString>,
    /// Classpath for the child; `None` leaves `CLASSPATH` out entirely.
    pub classpath: Option<OsString>,
    /// Complete variable set of the child.
    pub vars: BTreeMap<String, String>,
    pub current_dir: PathBuf,
}

impl JavaCommand {
    /// Turn this into a [`Command`] with a cleared environment.
    ///
    /// Only `vars` and the classpath reach the child; stdio is left for the
    /// caller to configure.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env_clear()
            .envs(
                self.vars
                    .iter()
                    .filter(|(k, _)| k.as_str() != CLASSPATH_VAR)
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )
            .current_dir(&self.current_dir);
        if let Some(classpath) = &self.classpath {
            cmd.env(CLASSPATH_VAR, classpath);
        }
        cmd
    }
}

impl fmt::Display for JavaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
