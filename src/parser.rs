//! Classification of a flat java-style command line.
//!
//! The accepted shape is `[flag...] target [argument...]`. Flags must be
//! written in a no-space form (`-Dfoo=bar`, `-foo:bar`), since a separate value
//! token would be indistinguishable from the target.

/// Marker that starts an option token.
pub const FLAG_PREFIX: char = '-';

/// Result of splitting a command line into options, main target and arguments.
///
/// Every input token ends up in exactly one of the three groups, in its
/// original relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    main: Option<String>,
    options: Vec<String>,
    arguments: Vec<String>,
}

impl ParsedCommand {
    /// The first non-flag token, if any.
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }

    /// Flags seen before the main target.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Everything after the main target, passed through untouched.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Total number of classified tokens.
    pub fn len(&self) -> usize {
        self.options.len() + self.arguments.len() + usize::from(self.main.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the command and hand out `(main, options, arguments)`.
    pub fn into_parts(self) -> (Option<String>, Vec<String>, Vec<String>) {
        (self.main, self.options, self.arguments)
    }
}

fn is_flag(token: &str) -> bool {
    token.starts_with(FLAG_PREFIX)
}

/// Split `tokens` into options, main target and trailing arguments.
///
/// The first token not starting with [`FLAG_PREFIX`] becomes the main target.
/// Flags before it are options; every token after it is an argument, even one
/// that looks like a flag, since those belong to the invoked program.
///
/// Never fails. An input without any non-flag token leaves
/// [`ParsedCommand::main`] unset and it is up to the caller to reject that.
///
/// ```
/// use java_launch::classify;
/// let cmd = classify(["-Dfoo=bar", "HelloClass", "some", "args"]);
/// assert_eq!(cmd.main(), Some("HelloClass"));
/// assert_eq!(cmd.options(), ["-Dfoo=bar"]);
/// assert_eq!(cmd.arguments(), ["some", "args"]);
/// ```
pub fn classify<I, S>(tokens: I) -> ParsedCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = ParsedCommand::default();
    for token in tokens {
        let token = token.into();
        if parsed.main.is_some() {
            parsed.arguments.push(token);
        } else if is_flag(&token) {
            parsed.options.push(token);
        } else {
            parsed.main = Some(token);
        }
    }
    parsed
}
