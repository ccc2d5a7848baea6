use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::TempPath;

use crate::cache::Cache;
use crate::command::{ExitCode, JavaCommand};
use crate::env::Environment;
use crate::error::{LaunchError, Result};
use crate::external::{exit_code, find_executable};
use crate::parser::classify;
use crate::target::{Target, TargetKind};

/// Overrides the java executable picked by [`Launcher::from_env`].
pub const JAVA_VAR: &str = "JAVA_LAUNCH_JAVA";
/// Overrides the cache root picked by [`Launcher::from_env`].
pub const CACHE_VAR: &str = "JAVA_LAUNCH_CACHE";

const DEFAULT_JAVA: &str = "java";
const JAR_FLAG: &str = "-jar";

/// Runs java programs described by `[flag...] target [argument...]`.
///
/// Options must be written in a no-space form (`-Dfoo=bar`, `-Xmx512m`)
/// because the first token without a leading dash is taken as the target.
/// Everything after the target goes to the java program untouched.
///
/// `.java` and `.jar` targets are replaced by their cached copy when one
/// exists, and the cache root is put in front of the classpath so extracted
/// classes win over anything else.
///
/// Example
/// ```no_run
/// use java_launch::Launcher;
/// let launcher = Launcher::from_env();
/// let code = launcher.exec(["-Dfoo=bar", "HelloWorld", "arg"]).unwrap();
/// assert_eq!(code, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Launcher {
    env: Environment,
    cache: Option<Cache>,
    java: PathBuf,
}

impl Launcher {
    /// A launcher with no cache that runs `java` from the environment's PATH.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            cache: None,
            java: PathBuf::from(DEFAULT_JAVA),
        }
    }

    /// A launcher configured from the current process environment.
    ///
    /// Honors [`JAVA_VAR`] and [`CACHE_VAR`]; without the latter the per-user
    /// default cache is used.
    pub fn from_env() -> Self {
        let env = Environment::new();
        let java = env.get_var(JAVA_VAR).map(PathBuf::from);
        let cache = match env.get_var(CACHE_VAR) {
            Some(root) => Some(Cache::new(root)),
            None => Cache::user_default(),
        };
        let mut launcher = Self::new(env);
        launcher.cache = cache;
        if let Some(java) = java {
            launcher.java = java;
        }
        launcher
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn with_java(mut self, java: impl Into<PathBuf>) -> Self {
        self.java = java.into();
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn cache(&self) -> Option<&Cache> {
        self.cache.as_ref()
    }

    /// Run the command line with inherited stdin, stdout and stderr.
    pub fn exec<I, S>(&self, tokens: I) -> Result<ExitCode>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prepare_tokens(tokens, None)?.exec()
    }

    /// Run the command line and return what it wrote to stdout.
    ///
    /// Stderr is logged. A non-zero exit is reported as
    /// [`LaunchError::Failed`] carrying the captured stderr.
    pub fn output<I, S>(&self, tokens: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prepare_tokens(tokens, None)?.output()
    }

    /// Classify `tokens` and build the invocation without running it.
    ///
    /// With `kind` set the target is built as that kind; otherwise it is
    /// inferred from the shape of the main token.
    pub fn prepare_tokens<I, S>(&self, tokens: I, kind: Option<TargetKind>) -> Result<Invocation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parsed = classify(tokens);
        let main = parsed.main().ok_or(LaunchError::NoTarget)?;
        let target = match kind {
            Some(kind) => Target::with_kind(kind, main),
            None => Target::infer(main),
        };
        self.prepare(&target, parsed.options(), parsed.arguments())
    }

    /// Build the invocation for an explicitly chosen target.
    pub fn prepare(
        &self,
        target: &Target,
        options: &[String],
        arguments: &[String],
    ) -> Result<Invocation> {
        let program = self.resolve_java()?;

        let mut args: Vec<OsString> = options.iter().map(OsString::from).collect();
        let mut scratch = None;
        match target {
            Target::SourceFile(path) => args.push(self.prefer_cached(path).into_os_string()),
            Target::Archive(path) => {
                if !options.iter().any(|o| o == JAR_FLAG) {
                    args.push(JAR_FLAG.into());
                }
                args.push(self.prefer_cached(path).into_os_string());
            }
            Target::CompiledClass(name) => args.push(name.into()),
            Target::InlineSource(source) => {
                let path = write_inline_source(source)?;
                args.push(path.as_os_str().to_owned());
                scratch = Some(path);
            }
        }
        args.extend(arguments.iter().map(OsString::from));

        let front = self
            .cache
            .as_ref()
            .map(Cache::root)
            .filter(|root| root.is_dir());
        let command = JavaCommand {
            program,
            args,
            classpath: self.env.classpath_for(front)?,
            vars: self.env.vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            current_dir: self.env.current_dir.clone(),
        };
        log::debug!("prepared: {}", command);
        Ok(Invocation {
            command,
            _scratch: scratch,
        })
    }

    fn resolve_java(&self) -> Result<PathBuf> {
        let search_paths = self.env.get_var("PATH").map(OsStr::new);
        // Relative paths with a directory part are taken from the child's working dir.
        let java = if self.java.is_relative() && self.java.components().nth(1).is_some() {
            Cow::Owned(self.env.current_dir.join(&self.java))
        } else {
            Cow::Borrowed(self.java.as_path())
        };
        find_executable(search_paths, &java)
            .map(Cow::into_owned)
            .ok_or_else(|| LaunchError::JavaNotFound(self.java.display().to_string()))
    }

    fn prefer_cached(&self, path: &Path) -> PathBuf {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lookup(path))
            .unwrap_or_else(|| path.to_path_buf())
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::from_env()
    }
}

fn write_inline_source(source: &str) -> Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("inline")
        .suffix(".java")
        .tempfile()?;
    file.write_all(source.as_bytes())?;
    file.flush()?;
    Ok(file.into_temp_path())
}

/// A prepared java run.
///
/// Owns any scratch file the run needs; it is removed when the invocation is
/// dropped.
#[derive(Debug)]
pub struct Invocation {
    command: JavaCommand,
    _scratch: Option<TempPath>,
}

impl Invocation {
    pub fn command(&self) -> &JavaCommand {
        &self.command
    }

    pub fn exec(&self) -> Result<ExitCode> {
        log::debug!("exec: {}", self.command);
        let status = self
            .command
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| self.spawn_error(source))?;
        Ok(exit_code(status))
    }

    pub fn output(&self) -> Result<String> {
        log::debug!("output: {}", self.command);
        let output = self
            .command
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.spawn_error(source))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.is_empty() {
            log::warn!("{}: {}", self.command.program.display(), stderr.trim_end());
        }
        if !output.status.success() {
            return Err(LaunchError::Failed {
                code: exit_code(output.status),
                stderr,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn spawn_error(&self, source: std::io::Error) -> LaunchError {
        LaunchError::Spawn {
            program: self.command.program.clone(),
            source,
        }
    }
}
