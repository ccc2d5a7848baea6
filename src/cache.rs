//! Lookup of previously extracted resources.
//!
//! A cache is just a root directory. Whatever lives below it is trusted for
//! as long as it exists; there is no staleness check and nothing is written
//! back.

use std::path::{Component, Path, PathBuf};

/// Name of the sub-directory used under the user cache directory.
pub const CACHE_DIR_NAME: &str = "java_launch";

/// Directory under which extracted sources, classes and archives are found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The per-user default location, `<user cache dir>/java_launch`.
    ///
    /// Returns `None` on platforms where no user cache directory is known.
    pub fn user_default() -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::new(dir.join(CACHE_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of `name` inside the cache, if something exists there.
    ///
    /// A root or drive prefix on `name` is dropped, so `/hello.java` is looked
    /// up as `<root>/hello.java`.
    pub fn lookup(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        let relative: PathBuf = name
            .as_ref()
            .components()
            .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();
        let joined = self.root.join(relative);
        if joined.exists() {
            log::debug!("cache hit: {}", joined.display());
            Some(joined)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lookup_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("hello.java"), "class Hello {}").unwrap();

        let cache = Cache::new(dir.path());
        assert_eq!(
            cache.lookup("hello.java"),
            Some(dir.path().join("hello.java"))
        );
    }

    #[test]
    fn test_lookup_nested_and_directory_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("foo/bar")).unwrap();
        fs::write(dir.path().join("foo/bar/Some.class"), [0xCA, 0xFE]).unwrap();

        let cache = Cache::new(dir.path());
        assert!(cache.lookup("foo/bar/Some.class").is_some());
        assert!(cache.lookup("foo").is_some());
    }

    #[test]
    fn test_lookup_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = Cache::new(dir.path());
        assert_eq!(cache.lookup("HelloWorld.class"), None);
    }

    #[test]
    fn test_absolute_name_stays_under_root() {
        let root = tempfile::tempdir().expect("tempdir");
        let elsewhere = tempfile::tempdir().expect("tempdir");
        let outside = elsewhere.path().join("hello.java");
        fs::write(&outside, "class Hello {}").unwrap();

        let cache = Cache::new(root.path());
        assert_eq!(cache.lookup(&outside), None);

        let relative: PathBuf = outside
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        fs::create_dir_all(root.path().join(&relative).parent().unwrap()).unwrap();
        fs::write(root.path().join(&relative), "class Hello {}").unwrap();
        assert_eq!(cache.lookup(&outside), Some(root.path().join(&relative)));
    }

    #[test]
    fn test_user_default_ends_with_dir_name() {
        if let Some(cache) = Cache::user_default() {
            assert!(cache.root().ends_with(CACHE_DIR_NAME));
        }
    }
}
