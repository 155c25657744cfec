//! Splitting an input line into a command word and its arguments.
//!
//! There is no quoting, escaping or metacharacter handling: fragments are
//! separated by runs of ASCII space and nothing else.

use crate::error::ShellError;
use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(" +").expect("valid regex"));

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The first fragment, naming the action.
    pub verb: String,
    /// Remaining fragments in their original order.
    pub args: Vec<String>,
}

/// Tokenize `line` into a [`Command`].
///
/// Returns [`ShellError::EmptyInput`] when the line is empty or only spaces;
/// callers must not dispatch in that case.
pub fn tokenize(line: &str) -> Result<Command, ShellError> {
    let mut fragments = SEPARATOR
        .split(line)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string);

    let verb = fragments.next().ok_or(ShellError::EmptyInput)?;
    Ok(Command {
        verb,
        args: fragments.collect(),
    })
}
