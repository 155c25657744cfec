//! A minimal interactive command shell.
//!
//! Each input line is split on spaces into a verb and its arguments, then
//! resolved in a fixed order: a builtin (`echo`, `exit`, `pwd`, `cd`), the
//! `type` introspection command, or a program found on the search path.
//! Anything else is reported as `command not found`.
//!
//! The main entry point is [`Interpreter`]. The executable index over the
//! search path is built once at startup and never refreshed, and `cd` only
//! changes the shell's own notion of the working directory.

pub mod builtin;
pub mod config;
pub mod env;
pub mod error;
pub mod external;
pub mod index;
pub mod interpreter;
pub mod lexer;
pub mod log;

#[cfg(test)]
mod testutil;

/// Just a convenient re-export of the command interpreter.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
