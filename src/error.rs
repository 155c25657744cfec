use std::fmt;
use std::io;

/// Everything that can go wrong while handling one command line.
///
/// Most variants are user-facing and are printed to the shell's standard
/// output; the rest are logged and dropped. None of them terminate the shell.
#[derive(Debug)]
pub enum ShellError {
    /// The line was empty or contained only spaces.
    EmptyInput,
    /// The verb is neither a builtin, `type`, nor an indexed executable.
    UnknownCommand { verb: String, args: Vec<String> },
    /// A builtin was called with an argument shape it does not accept.
    MalformedInvocation { verb: String, args: Vec<String> },
    /// `cd` target does not name an existing directory.
    DirectoryNotFound { target: String },
    /// A builtin that needs an operand got none.
    MissingOperand { verb: String },
    /// The resolved executable could not be spawned or its output read.
    SpawnFailure { program: String, source: io::Error },
    /// Writing to the output sink failed.
    Io(io::Error),
}

impl ShellError {
    /// Whether this error is shown to the user on standard output.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            ShellError::UnknownCommand { .. }
                | ShellError::MalformedInvocation { .. }
                | ShellError::DirectoryNotFound { .. }
                | ShellError::MissingOperand { .. }
        )
    }

    pub fn malformed(verb: &str, args: &[String]) -> Self {
        ShellError::MalformedInvocation {
            verb: verb.to_string(),
            args: args.to_vec(),
        }
    }
}

/// `<verb>: command not found` or `<verb> <args...>: command not found`.
fn write_not_found(f: &mut fmt::Formatter<'_>, verb: &str, args: &[String]) -> fmt::Result {
    if args.is_empty() {
        write!(f, "{}: command not found", verb)
    } else {
        write!(f, "{} {}: command not found", verb, args.join(" "))
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::EmptyInput => write!(f, "empty input"),
            ShellError::UnknownCommand { verb, args } => write_not_found(f, verb, args),
            ShellError::MalformedInvocation { verb, args } => write_not_found(f, verb, args),
            ShellError::DirectoryNotFound { target } => {
                write!(f, "cd: {}: No such file or directory", target)
            }
            ShellError::MissingOperand { verb } => write!(f, "{}: missing operand", verb),
            ShellError::SpawnFailure { program, source } => {
                write!(f, "failed to run {}: {}", program, source)
            }
            ShellError::Io(e) => write!(f, "output error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::SpawnFailure { source, .. } => Some(source),
            ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_not_found_without_args() {
        let err = ShellError::UnknownCommand {
            verb: "foo".to_string(),
            args: Vec::new(),
        };
        assert_eq!(err.to_string(), "foo: command not found");
    }

    #[test]
    fn test_not_found_with_args() {
        let err = ShellError::UnknownCommand {
            verb: "foo".to_string(),
            args: strings(&["a", "b"]),
        };
        assert_eq!(err.to_string(), "foo a b: command not found");
    }

    #[test]
    fn test_malformed_renders_like_unknown() {
        let args = strings(&["1"]);
        let malformed = ShellError::malformed("exit", &args);
        let unknown = ShellError::UnknownCommand {
            verb: "exit".to_string(),
            args,
        };
        assert_eq!(malformed.to_string(), unknown.to_string());
        assert_eq!(malformed.to_string(), "exit 1: command not found");
    }

    #[test]
    fn test_directory_not_found_message() {
        let err = ShellError::DirectoryNotFound {
            target: "/nope".to_string(),
        };
        assert_eq!(err.to_string(), "cd: /nope: No such file or directory");
    }

    #[test]
    fn test_reportable_split() {
        assert!(!ShellError::EmptyInput.is_reportable());
        assert!(
            !ShellError::SpawnFailure {
                program: "x".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            }
            .is_reportable()
        );
        assert!(ShellError::malformed("pwd", &strings(&["x"])).is_reportable());
        assert!(
            ShellError::MissingOperand {
                verb: "type".to_string()
            }
            .is_reportable()
        );
    }
}
