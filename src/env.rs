use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{LaunchError, Result};

/// Variable consulted for the classpath of launched programs.
pub const CLASSPATH_VAR: &str = "CLASSPATH";

/// Explicit view of the environment a java process is launched with.
///
/// The launcher never touches the parent's environment. Variables and
/// classpath entries set here are applied to the child command only, so
/// launches with different settings can run side by side.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Variables visible to the launched process (e.g. PATH, CLASSPATH).
    pub vars: HashMap<String, String>,
    /// Working directory of the launched process.
    pub current_dir: PathBuf,
    /// Entries placed in front of any inherited `CLASSPATH`.
    pub classpath: Vec<PathBuf>,
}

impl Environment {
    /// Capture the current process variables and working directory.
    pub fn new() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vars,
            current_dir,
            classpath: Vec::new(),
        }
    }

    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    pub fn remove_var(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Append an entry to the explicit classpath.
    pub fn push_classpath(&mut self, entry: impl Into<PathBuf>) {
        self.classpath.push(entry.into());
    }

    /// Compose the classpath for a child process.
    ///
    /// Order is `front` (typically the cache root), then the explicit entries,
    /// then whatever `CLASSPATH` this environment carries. Returns `None` when
    /// all three are empty so that java falls back to its own default.
    pub fn classpath_for(&self, front: Option<&Path>) -> Result<Option<OsString>> {
        let mut entries: Vec<PathBuf> = front.map(Path::to_path_buf).into_iter().collect();
        entries.extend(self.classpath.iter().cloned());
        if let Some(inherited) = self.get_var(CLASSPATH_VAR) {
            entries.extend(stdenv::split_paths(inherited));
        }
        if entries.is_empty() {
            return Ok(None);
        }
        stdenv::join_paths(&entries)
            .map(Some)
            .map_err(|e| LaunchError::Classpath(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare() -> Environment {
        Environment {
            vars: HashMap::new(),
            current_dir: stdenv::current_dir().unwrap(),
            classpath: Vec::new(),
        }
    }

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = bare();
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);

        env.set_var("KEY", "VALUE");
        assert_eq!(env.get_var("KEY"), Some("VALUE"));

        assert_eq!(env.remove_var("KEY"), Some("VALUE".to_string()));
        assert_eq!(env.get_var("KEY"), None);
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
    }

    #[test]
    fn test_classpath_empty_is_none() {
        assert_eq!(bare().classpath_for(None).unwrap(), None);
    }

    #[test]
    fn test_classpath_order() {
        let mut env = bare();
        env.push_classpath("lib/a.jar");
        env.set_var(
            CLASSPATH_VAR,
            stdenv::join_paths(["inherited1", "inherited2"])
                .unwrap()
                .into_string()
                .unwrap(),
        );

        let cp = env.classpath_for(Some(Path::new("cache"))).unwrap().unwrap();
        let parts: Vec<PathBuf> = stdenv::split_paths(&cp).collect();
        assert_eq!(
            parts,
            ["cache", "lib/a.jar", "inherited1", "inherited2"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_classpath_does_not_touch_process_env() {
        let before = stdenv::var_os(CLASSPATH_VAR);
        let mut env = bare();
        env.push_classpath("only/for/child");
        env.classpath_for(None).unwrap();
        assert_eq!(stdenv::var_os(CLASSPATH_VAR), before);
    }

    #[test]
    fn test_invalid_classpath_entry() {
        let mut env = bare();
        let sep = if cfg!(windows) { ";" } else { ":" };
        env.push_classpath(format!("bad{}entry", sep));
        assert!(matches!(
            env.classpath_for(None),
            Err(LaunchError::Classpath(_))
        ));
    }
}
