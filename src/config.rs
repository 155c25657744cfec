//! Startup configuration: command-line flags plus a snapshot of the environment.
//!
//! There is no configuration file. Everything the shell needs from the outside
//! world is read exactly once, here.

use crate::log::Level;
use anyhow::{Context, Result};
use argh::FromArgs;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable holding the default diagnostics level.
pub const LOG_ENV: &str = "MINISH_LOG";

/// Prompt shown when `--prompt` is not given.
pub const DEFAULT_PROMPT: &str = "$ ";

#[derive(FromArgs, Debug)]
/// A minimal interactive command shell.
pub struct Cli {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// prompt printed before each input line
    pub prompt: String,

    #[argh(option)]
    /// search path to index instead of $PATH
    pub path: Option<String>,

    #[argh(option)]
    /// diagnostics on stderr: trace, debug, info, warn, error or off (default: $MINISH_LOG or off)
    pub log_level: Option<Level>,

    #[argh(option, short = 'c')]
    /// run this line instead of reading input; may be repeated
    pub command: Vec<String>,
}

/// Everything the interpreter needs at startup.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub prompt: String,
    /// Search-path list the executable index is built from.
    pub path_var: OsString,
    /// Initial working directory, `None` if it could not be determined.
    pub working_dir: Option<PathBuf>,
    /// Home directory used for `~` in `cd`.
    pub home: Option<PathBuf>,
    pub log_level: Level,
    /// Lines to run non-interactively. Empty means read from standard input.
    pub commands: Vec<String>,
}

impl ShellConfig {
    /// Combine parsed flags with the process environment.
    pub fn from_env(cli: Cli) -> Result<Self> {
        let log_level = match cli.log_level {
            Some(level) => level,
            None => match env::var(LOG_ENV) {
                Ok(value) => value
                    .parse()
                    .with_context(|| format!("invalid {} value", LOG_ENV))?,
                Err(_) => Level::Off,
            },
        };

        let path_var = cli
            .path
            .map(OsString::from)
            .or_else(|| env::var_os("PATH"))
            .unwrap_or_default();

        let home = env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            prompt: cli.prompt,
            path_var,
            working_dir: initial_working_dir(env::var_os("PWD")),
            home,
            log_level,
            commands: cli.command,
        })
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            path_var: OsString::new(),
            working_dir: None,
            home: None,
            log_level: Level::Off,
            commands: Vec::new(),
        }
    }
}

/// Pick the starting directory: `$PWD` when it is an absolute path to an
/// existing directory, otherwise the process's current directory.
pub fn initial_working_dir(pwd: Option<OsString>) -> Option<PathBuf> {
    pwd.map(PathBuf::from)
        .filter(|dir| is_usable_dir(dir))
        .or_else(|| env::current_dir().ok())
}

fn is_usable_dir(dir: &Path) -> bool {
    dir.is_absolute() && dir.is_dir()
}
