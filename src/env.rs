use std::path::{Component, Path, PathBuf};

/// Mutable state owned by the interpreter.
///
/// The state contains:
/// - `current_dir`: the shell's own working directory. It starts from the
///   environment but is only ever changed by `cd`; the OS process directory
///   is left alone.
/// - `home`: the home directory captured at startup, used for `~`.
/// - `should_exit`: set by `exit 0` so the read loop knows to stop.
#[derive(Debug, Clone, Default)]
pub struct ShellState {
    /// Absolute, normalized working directory. `None` only if it could not be
    /// determined at startup.
    pub current_dir: Option<PathBuf>,
    /// Value of `HOME` at startup.
    pub home: Option<PathBuf>,
    /// When set to true, indicates that the read loop should exit.
    pub should_exit: bool,
}

impl ShellState {
    pub fn new(current_dir: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.map(|dir| normalize(&dir)),
            home,
            should_exit: false,
        }
    }

    /// Resolve `target` the way `cd` sees it: `~` expansion, then relative
    /// paths joined onto the working directory, then lexical normalization.
    ///
    /// Returns `None` for a relative target when the working directory is unset.
    pub fn resolve_dir(&self, target: &str) -> Option<PathBuf> {
        let expanded = self.expand_home(target);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            self.current_dir.as_ref()?.join(expanded)
        };
        Some(normalize(&joined))
    }

    fn expand_home(&self, target: &str) -> PathBuf {
        match (&self.home, target.strip_prefix('~')) {
            (Some(home), Some("")) => home.clone(),
            (Some(home), Some(rest)) if rest.starts_with('/') => {
                home.join(rest.trim_start_matches('/'))
            }
            _ => PathBuf::from(target),
        }
    }
}

/// Collapse `.` segments, `..` segments and redundant separators without
/// touching the filesystem. `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
