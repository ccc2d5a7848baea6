//! A thin launcher for Java sources, classes and archives.
//!
//! This crate locates a locally installed `java` executable and hands it a
//! command line assembled from a flat list of tokens. Nothing Java-specific is
//! implemented here: compilation, class loading and execution are all done by
//! the external interpreter.
//!
//! The pieces, bottom-up:
//! - [`parser::classify`] splits tokens into leading options, the main target
//!   and trailing arguments.
//! - [`cache::Cache`] looks up previously extracted resources by relative name.
//! - [`target::Target`] says what the main token names (source file, class,
//!   archive or inline source).
//! - [`env::Environment`] carries the classpath and variables handed to the
//!   child process, so nothing is ever set process-wide.
//! - [`Launcher`] ties these together and runs `java`.

pub mod cache;
pub mod command;
pub mod env;
pub mod error;
mod external;
mod launcher;
pub mod parser;
pub mod target;

pub use cache::Cache;
pub use error::{LaunchError, Result};
pub use launcher::{CACHE_VAR, Invocation, JAVA_VAR, Launcher};
pub use parser::{ParsedCommand, classify};
pub use target::{Target, class_to_path};
