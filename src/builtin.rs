use crate::env::ShellState;
use crate::error::ShellError;
use crate::index::SearchPathIndex;
use std::collections::BTreeMap;
use std::io::Write;

/// Name of the introspection command. It is dispatched alongside the
/// builtins but is not stored in the registry.
pub const TYPE: &str = "type";

/// Built-in commands known to the shell at compile time.
///
/// Builtins are executed directly in-process without spawning a child process.
/// An argument shape a builtin does not accept is reported as
/// [`ShellError::MalformedInvocation`], which renders exactly like an unknown command.
pub(crate) trait BuiltinCommand {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name(&self) -> &'static str;

    /// Executes the command, writing any output to `stdout`.
    fn execute(
        &self,
        args: &[String],
        stdout: &mut dyn Write,
        state: &mut ShellState,
    ) -> Result<(), ShellError>;
}

/// Write the arguments to standard output, separated by single spaces.
pub struct Echo;

impl BuiltinCommand for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(
        &self,
        args: &[String],
        stdout: &mut dyn Write,
        _state: &mut ShellState,
    ) -> Result<(), ShellError> {
        writeln!(stdout, "{}", args.join(" "))?;
        Ok(())
    }
}

/// Ask the shell to terminate. Only the exact invocation `exit 0` is accepted.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(
        &self,
        args: &[String],
        _stdout: &mut dyn Write,
        state: &mut ShellState,
    ) -> Result<(), ShellError> {
        match args {
            [code] if code == "0" => {
                state.should_exit = true;
                Ok(())
            }
            _ => Err(ShellError::malformed(self.name(), args)),
        }
    }
}

/// Print the shell's working directory.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn execute(
        &self,
        args: &[String],
        stdout: &mut dyn Write,
        state: &mut ShellState,
    ) -> Result<(), ShellError> {
        if !args.is_empty() {
            return Err(ShellError::malformed(self.name(), args));
        }
        if let Some(dir) = &state.current_dir {
            writeln!(stdout, "{}", dir.display())?;
        }
        Ok(())
    }
}

/// Change the shell's working directory.
///
/// Takes exactly one target, absolute or relative to the current directory.
/// The stored path is normalized lexically; symbolic links are followed for
/// the existence check but kept as written.
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(
        &self,
        args: &[String],
        _stdout: &mut dyn Write,
        state: &mut ShellState,
    ) -> Result<(), ShellError> {
        let [target] = args else {
            return Err(ShellError::malformed(self.name(), args));
        };
        let not_found = || ShellError::DirectoryNotFound {
            target: target.clone(),
        };

        let new_dir = state.resolve_dir(target).ok_or_else(not_found)?;
        if !new_dir.is_dir() {
            return Err(not_found());
        }
        crate::debug!("cd: {}", new_dir.display());
        state.current_dir = Some(new_dir);
        Ok(())
    }
}

/// The closed set of registry builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Echo,
    Exit,
    Pwd,
    Cd,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [Builtin::Echo, Builtin::Exit, Builtin::Pwd, Builtin::Cd];

    fn command(self) -> &'static dyn BuiltinCommand {
        match self {
            Builtin::Echo => &Echo,
            Builtin::Exit => &Exit,
            Builtin::Pwd => &Pwd,
            Builtin::Cd => &Cd,
        }
    }

    pub fn name(self) -> &'static str {
        self.command().name()
    }

    pub fn execute(
        self,
        args: &[String],
        stdout: &mut dyn Write,
        state: &mut ShellState,
    ) -> Result<(), ShellError> {
        self.command().execute(args, stdout, state)
    }
}

/// Fixed mapping from reserved verbs to their builtin.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, Builtin>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let commands = Builtin::ALL
            .iter()
            .map(|&builtin| (builtin.name(), builtin))
            .collect();
        Self { commands }
    }

    pub fn get(&self, verb: &str) -> Option<Builtin> {
        self.commands.get(verb).copied()
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.commands.contains_key(verb)
    }

    /// Whether `type` reports `name` as a shell builtin.
    pub fn is_shell_builtin(&self, name: &str) -> bool {
        self.contains(name) || name == TYPE
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Describe how each name would be interpreted if used as a verb.
///
/// Each name gets one line: a builtin (including `type` itself), the full path
/// of an indexed executable, or `not found`. Without names, reports
/// [`ShellError::MissingOperand`].
pub fn type_command(
    args: &[String],
    stdout: &mut dyn Write,
    registry: &BuiltinRegistry,
    index: &SearchPathIndex,
) -> Result<(), ShellError> {
    if args.is_empty() {
        return Err(ShellError::MissingOperand {
            verb: TYPE.to_string(),
        });
    }
    for name in args {
        if registry.is_shell_builtin(name) {
            writeln!(stdout, "{} is a shell builtin", name)?;
        } else if let Some(path) = index.resolve(name) {
            writeln!(stdout, "{} is {}", name, path.display())?;
        } else {
            writeln!(stdout, "{}: not found", name)?;
        }
    }
    Ok(())
}
