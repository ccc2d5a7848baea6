use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use crate::command::ExitCode;

/// Locate an executable the way a shell would before spawning it.
///
/// - Empty name: `None`.
/// - Name with more than one component (`bin/java`, `/usr/bin/java`): used
///   as is when it is an executable file.
/// - Bare name (`java`): each directory of `search_paths` is tried in order.
///
/// On Unix a candidate needs an execute bit; files without one are skipped.
/// On Windows a missing `.exe` extension is added when probing.
pub fn find_executable<'a>(search_paths: Option<&OsStr>, name: &'a Path) -> Option<Cow<'a, Path>> {
    let mut components = name.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(single), None) if !name.is_absolute() => {
            let search_paths = search_paths?;
            std::env::split_paths(search_paths)
                .find_map(|dir| probe(&dir.join(single.as_os_str())))
                .map(Cow::Owned)
        }
        _ => {
            if is_executable(name) {
                Some(Cow::Borrowed(name))
            } else {
                probe(name).map(Cow::Owned)
            }
        }
    }
}

fn probe(candidate: &Path) -> Option<PathBuf> {
    if is_executable(candidate) {
        return Some(candidate.to_path_buf());
    }
    if cfg!(windows) && candidate.extension().is_none() {
        let mut with_exe = OsString::from(candidate.as_os_str());
        with_exe.push(".exe");
        let with_exe = PathBuf::from(with_exe);
        if is_executable(&with_exe) {
            return Some(with_exe);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Exit code of a finished child, following the shell convention for
/// children killed by a signal.
pub fn exit_code(status: ExitStatus) -> ExitCode {
    status.code().unwrap_or_else(|| terminated_by_signal(status))
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
        128 + signal
    } else if status.core_dumped() {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> ExitCode {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    /// Create an empty file that `find_executable` accepts.
    fn touch_executable(path: &Path) {
        File::create(path).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn test_bare_name_found_in_search_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let exe = if cfg!(windows) { "java.exe" } else { "java" };
        touch_executable(&bin.join(exe));

        let paths = std::env::join_paths([dir.path().join("nothing-here"), bin.clone()]).unwrap();
        let found = find_executable(Some(paths.as_os_str()), Path::new("java")).expect("found in bin");
        assert_eq!(found.as_ref(), bin.join(exe));
    }

    #[test]
    fn test_bare_name_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = dir.path().as_os_str();
        assert!(find_executable(Some(paths), Path::new("java")).is_none());
        assert!(find_executable(None, Path::new("java")).is_none());
    }

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exe = dir.path().join("java");
        touch_executable(&exe);

        let found = find_executable(None, &exe).expect("absolute path exists");
        assert_eq!(found.as_ref(), exe.as_path());

        let missing = dir.path().join("missing");
        assert!(find_executable(None, &missing).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_non_executable_file_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let (a, b) = (dir.path().join("a"), dir.path().join("b"));
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        File::create(a.join("java")).unwrap();
        fs::set_permissions(a.join("java"), fs::Permissions::from_mode(0o644)).unwrap();
        touch_executable(&b.join("java"));

        let paths = std::env::join_paths([&a, &b]).unwrap();
        let found = find_executable(Some(paths.as_os_str()), Path::new("java")).expect("found in b");
        assert_eq!(found.as_ref(), b.join("java"));

        assert!(find_executable(None, &a.join("java")).is_none());
    }

    #[test]
    fn test_empty_name() {
        assert!(find_executable(Some(OsStr::new("/bin")), Path::new("")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_code_of_signal() {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(exit_code(ExitStatus::from_raw(9)), 128 + 9);
        assert_eq!(exit_code(ExitStatus::from_raw(3 << 8)), 3);
    }
}
