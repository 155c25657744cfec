use crate::builtin::{self, Builtin, BuiltinRegistry};
use crate::config::ShellConfig;
use crate::env::ShellState;
use crate::error::ShellError;
use crate::external::ExternalCommand;
use crate::index::SearchPathIndex;
use crate::lexer::{self, Command};
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::path::PathBuf;

/// What a verb refers to, decided in strict priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registry builtin. Always wins over programs on the search path.
    Builtin(Builtin),
    /// The `type` introspection command.
    Type,
    /// An executable found in the index.
    External(PathBuf),
    NotFound,
}

/// A minimal shell interpreter that can execute built-in and external commands.
///
/// The interpreter owns the [`ShellState`], the builtin registry and the
/// [`SearchPathIndex`] built at startup. Lines are handled one at a time, each
/// to completion, before the next one is read.
///
/// Example
/// ```
/// use minish::Interpreter;
/// use minish::config::ShellConfig;
/// let mut sh = Interpreter::new(&ShellConfig::default());
/// let mut out = Vec::new();
/// sh.execute_line("echo hello world", &mut out).unwrap();
/// assert_eq!(out, b"hello world\n");
/// ```
pub struct Interpreter {
    state: ShellState,
    index: SearchPathIndex,
    builtins: BuiltinRegistry,
    prompt: String,
}

impl Interpreter {
    /// Create an interpreter, indexing the configured search path.
    pub fn new(config: &ShellConfig) -> Self {
        let mut interpreter = Self::with_parts(
            ShellState::new(config.working_dir.clone(), config.home.clone()),
            SearchPathIndex::build(&config.path_var),
        );
        interpreter.prompt = config.prompt.clone();
        interpreter
    }

    /// Create an interpreter from an already prepared state and index.
    pub fn with_parts(state: ShellState, index: SearchPathIndex) -> Self {
        Self {
            state,
            index,
            builtins: BuiltinRegistry::new(),
            prompt: crate::config::DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn index(&self) -> &SearchPathIndex {
        &self.index
    }

    /// Whether `exit 0` has been run.
    pub fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    /// Decide what `verb` refers to: builtin, then `type`, then the index.
    pub fn resolve(&self, verb: &str) -> Resolution {
        if let Some(builtin) = self.builtins.get(verb) {
            Resolution::Builtin(builtin)
        } else if verb == builtin::TYPE {
            Resolution::Type
        } else if let Some(path) = self.index.resolve(verb) {
            Resolution::External(path.to_path_buf())
        } else {
            Resolution::NotFound
        }
    }

    /// Route one command to its action.
    pub fn dispatch(&mut self, command: &Command, stdout: &mut dyn Write) -> Result<(), ShellError> {
        let resolution = self.resolve(&command.verb);
        crate::trace!("{} -> {:?}", command.verb, resolution);
        match resolution {
            Resolution::Builtin(builtin) => builtin.execute(&command.args, stdout, &mut self.state),
            Resolution::Type => {
                builtin::type_command(&command.args, stdout, &self.builtins, &self.index)
            }
            Resolution::External(path) => ExternalCommand::new(path, command.args.clone())
                .execute(stdout, self.state.current_dir.as_deref()),
            Resolution::NotFound => Err(ShellError::UnknownCommand {
                verb: command.verb.clone(),
                args: command.args.clone(),
            }),
        }
    }

    /// Tokenize and run one input line, printing user-facing errors to `stdout`.
    ///
    /// Only a failure to write to `stdout` is returned as an error; every other
    /// problem is either reported in-band or logged and dropped.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<()> {
        let result = lexer::tokenize(line).and_then(|command| self.dispatch(&command, stdout));
        match result {
            Ok(()) | Err(ShellError::EmptyInput) => {}
            Err(ShellError::Io(e)) => return Err(e).context("failed to write command output"),
            Err(e) if e.is_reportable() => writeln!(stdout, "{}", e)?,
            Err(e) => crate::warn!("{}", e),
        }
        Ok(())
    }

    /// Run `lines` in order, stopping early after `exit 0`.
    pub fn run_lines<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<()> {
        for line in lines {
            self.execute_line(line.as_ref(), stdout)?;
            stdout.flush()?;
            if self.should_exit() {
                break;
            }
        }
        Ok(())
    }

    /// Interactive read loop on the terminal.
    ///
    /// Ctrl-C drops the current line; end of input ends the session.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new().context("failed to initialize line editor")?;

        while !self.should_exit() {
            match rl.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    let mut stdout = std::io::stdout().lock();
                    self.execute_line(&line, &mut stdout)?;
                    stdout.flush()?;
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("failed to read input line"),
            }
        }

        Ok(())
    }
}
