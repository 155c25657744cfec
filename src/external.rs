use crate::error::ShellError;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A program found on the search path, ready to be run with its arguments.
///
/// Arguments are handed to the child as a proper argument vector; they are
/// never joined into one string and re-split.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    path: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(path: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            path: path.into(),
            args,
        }
    }

    /// Final path segment, presented to the child as its program name.
    pub fn base_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Run the program in `current_dir` and write its trimmed standard output.
    ///
    /// The child's standard error and exit status are discarded. Nothing is
    /// written when the trimmed output is empty.
    pub fn execute(
        &self,
        stdout: &mut dyn Write,
        current_dir: Option<&Path>,
    ) -> Result<(), ShellError> {
        let mut cmd = self.command();
        if let Some(dir) = current_dir {
            cmd.current_dir(dir);
        }
        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| ShellError::SpawnFailure {
                program: self.base_name().to_string_lossy().into_owned(),
                source,
            })?;
        crate::trace!(
            "{} exited with {}",
            self.base_name().to_string_lossy(),
            output.status
        );

        // Raw bytes: the child's output need not be UTF-8.
        let trimmed = output.stdout.trim_ascii_end();
        if !trimmed.is_empty() {
            stdout.write_all(trimmed)?;
            stdout.write_all(b"\n")?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn command(&self) -> Command {
        use std::os::unix::process::CommandExt;
        let mut cmd = Command::new(&self.path);
        cmd.arg0(self.base_name()).args(&self.args);
        cmd
    }

    #[cfg(not(unix))]
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.args(&self.args);
        cmd
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::{lock_spawn, make_unique_temp_dir, write_script};
    use std::fs;

    fn run(cmd: &ExternalCommand, dir: Option<&Path>) -> (Result<(), ShellError>, String) {
        let mut out = Vec::new();
        let res = cmd.execute(&mut out, dir);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_arguments_are_passed_as_vector() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("argv");
        let script = write_script(&dir, "show", r#"printf '[%s]' "$@""#);

        let args = vec!["a b".to_string(), "$HOME".to_string(), ";|&".to_string()];
        let (res, out) = run(&ExternalCommand::new(&script, args), None);
        assert!(res.is_ok());
        assert_eq!(out, "[a b][$HOME][;|&]\n");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_base_name_is_final_segment() {
        let cmd = ExternalCommand::new("/usr/local/bin/tool", Vec::new());
        assert_eq!(cmd.base_name(), OsStr::new("tool"));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_program_sees_base_name_as_argv0() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("arg0");
        let link = dir.join("renamed_sh");
        std::os::unix::fs::symlink("/bin/sh", &link).unwrap();

        // The shell's own argv[0], read back from the kernel.
        let args = vec![
            "-c".to_string(),
            r"tr '\0' '\n' < /proc/$$/cmdline | head -n 1".to_string(),
        ];
        let (res, out) = run(&ExternalCommand::new(&link, args), None);
        assert!(res.is_ok());
        assert_eq!(out, "renamed_sh\n");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_non_utf8_output_is_passed_through() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("bytes");
        let script = write_script(&dir, "binary", r"printf 'a\377b\n\n'");

        let mut out = Vec::new();
        let res = ExternalCommand::new(&script, Vec::new()).execute(&mut out, None);
        assert!(res.is_ok());
        assert_eq!(out, vec![b'a', 0xff, b'b', b'\n']);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("trim");
        let script = write_script(&dir, "lines", r#"printf 'one\ntwo\n\n\n  '"#);

        let (_, out) = run(&ExternalCommand::new(&script, Vec::new()), None);
        assert_eq!(out, "one\ntwo\n");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_empty_output_prints_nothing() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("silent");
        let script = write_script(&dir, "silent", "exit 3");

        let (res, out) = run(&ExternalCommand::new(&script, Vec::new()), None);
        assert!(res.is_ok());
        assert!(out.is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_stderr_is_not_forwarded() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("stderr");
        let script = write_script(&dir, "noisy", "echo out; echo err >&2");

        let (_, out) = run(&ExternalCommand::new(&script, Vec::new()), None);
        assert_eq!(out, "out\n");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_runs_in_shell_directory() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("cwd");
        let script = write_script(&dir, "here", "pwd");

        let (_, out) = run(&ExternalCommand::new(&script, Vec::new()), Some(&dir));
        assert_eq!(out, format!("{}\n", dir.display()));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_spawn_failure_is_reported_as_error() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("vanished");
        let missing = dir.join("gone");

        let (res, out) = run(&ExternalCommand::new(&missing, Vec::new()), None);
        let err = res.unwrap_err();
        assert!(matches!(err, ShellError::SpawnFailure { .. }));
        assert!(!err.is_reportable());
        assert!(out.is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_non_executable_file_fails_to_spawn() {
        let _lock = lock_spawn();
        let dir = make_unique_temp_dir("noexec");
        let path = dir.join("data");
        fs::write(&path, "not a program").unwrap();

        let (res, _) = run(&ExternalCommand::new(&path, Vec::new()), None);
        assert!(matches!(res, Err(ShellError::SpawnFailure { .. })));

        let _ = fs::remove_dir_all(dir);
    }
}
