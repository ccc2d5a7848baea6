//! What the main token of a command line names.

use std::fmt;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// A plain or package-qualified Java class name, optionally ending in `.class`.
static CLASS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*(\.[\p{L}_$][\p{L}\p{N}_$]*)*$")
        .expect("class name pattern is valid")
});

const CLASS_SUFFIX: &str = ".class";

/// The thing to hand to `java`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A `.java` file run in single-file source mode.
    SourceFile(PathBuf),
    /// A class name resolved against the classpath.
    CompiledClass(String),
    /// A `.jar` archive run with `-jar`.
    Archive(PathBuf),
    /// Java source text, written to a temporary file before running.
    InlineSource(String),
}

impl Target {
    /// Guess the target kind from the shape of `main`.
    ///
    /// `.java` and `.jar` suffixes select a file. Text containing whitespace
    /// or a brace is source. Anything else is handed to java as a class name;
    /// use [`Target::with_kind`] when the shape says nothing.
    pub fn infer(main: &str) -> Self {
        if main.ends_with(".java") {
            Target::SourceFile(PathBuf::from(main))
        } else if main.ends_with(".jar") {
            Target::Archive(PathBuf::from(main))
        } else if looks_like_source(main) {
            Target::InlineSource(main.to_owned())
        } else {
            if !is_class_name(main) {
                log::warn!("`{}` is not a valid class name, passing it to java as is", main);
            }
            Target::CompiledClass(strip_class_suffix(main).to_owned())
        }
    }

    /// Build a target of an explicitly chosen kind.
    pub fn with_kind(kind: TargetKind, main: &str) -> Self {
        match kind {
            TargetKind::Source => Target::SourceFile(PathBuf::from(main)),
            TargetKind::Class => Target::CompiledClass(strip_class_suffix(main).to_owned()),
            TargetKind::Jar => Target::Archive(PathBuf::from(main)),
            TargetKind::Inline => Target::InlineSource(main.to_owned()),
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Target::SourceFile(_) => TargetKind::Source,
            Target::CompiledClass(_) => TargetKind::Class,
            Target::Archive(_) => TargetKind::Jar,
            Target::InlineSource(_) => TargetKind::Inline,
        }
    }

    /// Relative name under which a file target may have been extracted.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Target::SourceFile(path) | Target::Archive(path) => Some(path),
            Target::CompiledClass(_) | Target::InlineSource(_) => None,
        }
    }
}

/// Explicit selector for [`Target::with_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Source,
    Class,
    Jar,
    Inline,
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" | "java" => Ok(TargetKind::Source),
            "class" => Ok(TargetKind::Class),
            "jar" => Ok(TargetKind::Jar),
            "inline" => Ok(TargetKind::Inline),
            other => Err(format!(
                "unknown target kind `{}` (expected source, class, jar or inline)",
                other
            )),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetKind::Source => "source",
            TargetKind::Class => "class",
            TargetKind::Jar => "jar",
            TargetKind::Inline => "inline",
        })
    }
}

fn looks_like_source(s: &str) -> bool {
    s.contains(|c: char| c.is_whitespace() || c == '{' || c == '}')
}

fn is_class_name(s: &str) -> bool {
    CLASS_NAME.is_match(s)
}

fn strip_class_suffix(name: &str) -> &str {
    name.strip_suffix(CLASS_SUFFIX).unwrap_or(name)
}

/// Translate a class name into the relative path of its class file.
///
/// Dots become path separators and `.class` is appended unless already
/// present, so `foo.bar.Some` and `foo.bar.Some.class` both map to
/// `foo/bar/Some.class`.
pub fn class_to_path(name: &str) -> PathBuf {
    let stem = strip_class_suffix(name).replace('.', MAIN_SEPARATOR_STR);
    PathBuf::from(format!("{}{}", stem, CLASS_SUFFIX))
}
