use std::path::PathBuf;

/// Errors raised while preparing or running a java command.
///
/// Classifying a command line never fails; everything here comes from the
/// launcher acting on the result.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The command line had no token that could serve as the main target.
    #[error("no target specified")]
    NoTarget,

    /// The java executable was not found on PATH or at the given path.
    #[error("java executable not found: {0}")]
    JavaNotFound(String),

    /// The executable was found but the process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited with a non-zero status.
    #[error("java exited with status {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    /// A classpath entry could not be joined, e.g. it contains the separator.
    #[error("invalid classpath entry: {0}")]
    Classpath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(LaunchError::NoTarget.to_string(), "no target specified");
        assert_eq!(
            LaunchError::JavaNotFound("java".into()).to_string(),
            "java executable not found: java"
        );
        let failed = LaunchError::Failed {
            code: 3,
            stderr: "boom".into(),
        };
        assert_eq!(failed.to_string(), "java exited with status 3: boom");
        let spawn = LaunchError::Spawn {
            program: PathBuf::from("/usr/bin/java"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(spawn.to_string().starts_with("failed to start /usr/bin/java: "));
    }
}
