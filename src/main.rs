use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use java_launch::command::ExitCode;
use java_launch::target::TargetKind;
use java_launch::{Cache, Launcher, class_to_path, classify};

#[derive(FromArgs)]
/// run java sources, classes and archives with the locally installed java.
struct Jrun {
    #[argh(subcommand)]
    command: Subcommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Run(Run),
    Classify(Classify),
    Cached(Cached),
    ClassPath(ClassPath),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// run `[flag...] target [argument...]`; put `--` in front when the first token is a flag.
struct Run {
    #[argh(option)]
    /// target kind: source, class, jar or inline. Inferred from the target when omitted.
    kind: Option<TargetKind>,

    #[argh(option)]
    /// directory to prefer extracted resources from.
    cache_dir: Option<PathBuf>,

    #[argh(switch)]
    /// do not consult any cache.
    no_cache: bool,

    #[argh(option)]
    /// extra classpath entry, may be repeated.
    classpath: Vec<PathBuf>,

    #[argh(option)]
    /// java executable to run instead of `java` from PATH.
    java: Option<PathBuf>,

    #[argh(switch)]
    /// capture the program's stdout and print it once it exits.
    capture: bool,

    #[argh(positional, greedy)]
    /// command line handed to java.
    tokens: Vec<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "classify")]
/// show how a command line splits into options, target and arguments.
struct Classify {
    #[argh(positional, greedy)]
    /// tokens to classify.
    tokens: Vec<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "cached")]
/// print the cached path of a resource; exits with 1 when it is not cached.
struct Cached {
    #[argh(option)]
    /// cache directory to look in.
    cache_dir: Option<PathBuf>,

    #[argh(positional)]
    /// relative name of the resource.
    name: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "class-path")]
/// print the relative class file path of a class name.
struct ClassPath {
    #[argh(positional)]
    /// class name such as foo.bar.Some.
    name: String,
}

fn run(cmd: Run) -> Result<ExitCode> {
    let mut launcher = Launcher::from_env();
    if let Some(dir) = cmd.cache_dir {
        launcher = launcher.with_cache(Cache::new(dir));
    }
    if cmd.no_cache {
        launcher = launcher.without_cache();
    }
    if let Some(java) = cmd.java {
        launcher = launcher.with_java(java);
    }
    for entry in cmd.classpath {
        launcher.env_mut().push_classpath(entry);
    }

    let invocation = launcher
        .prepare_tokens(cmd.tokens, cmd.kind)
        .context("jrun: can't prepare java command")?;
    if cmd.capture {
        let out = invocation.output().context("jrun: java failed")?;
        print!("{}", out);
        Ok(0)
    } else {
        invocation.exec().context("jrun: java failed")
    }
}

fn print_classified(cmd: Classify) -> ExitCode {
    let parsed = classify(cmd.tokens);
    println!("main: {}", parsed.main().unwrap_or(""));
    println!("options: {:?}", parsed.options());
    println!("arguments: {:?}", parsed.arguments());
    0
}

fn print_cached(cmd: Cached) -> Result<ExitCode> {
    let cache = match cmd.cache_dir {
        Some(dir) => Cache::new(dir),
        None => Launcher::from_env()
            .cache()
            .cloned()
            .context("jrun: no cache directory available")?,
    };
    match cache.lookup(&cmd.name) {
        Some(path) => {
            println!("{}", path.display());
            Ok(0)
        }
        None => Ok(1),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Jrun = argh::from_env();
    let result = match args.command {
        Subcommand::Run(cmd) => run(cmd),
        Subcommand::Classify(cmd) => Ok(print_classified(cmd)),
        Subcommand::Cached(cmd) => print_cached(cmd),
        Subcommand::ClassPath(cmd) => {
            println!("{}", class_to_path(&cmd.name).display());
            Ok(0)
        }
    };
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
