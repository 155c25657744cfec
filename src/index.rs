use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Snapshot of every entry in every directory of a search path.
///
/// Built once at startup and never refreshed. Lookups honor path order: the
/// first directory that holds a matching name wins. Directories that cannot be
/// listed are skipped and contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct SearchPathIndex {
    dirs: Vec<PathBuf>,
    /// Full paths of every entry, in directory order.
    entries: Vec<PathBuf>,
    first_by_name: HashMap<OsString, usize>,
}

impl SearchPathIndex {
    /// Build the index from a search-path list such as the value of `PATH`.
    pub fn build(path_var: impl AsRef<OsStr>) -> Self {
        let mut index = Self::default();
        for dir in std::env::split_paths(path_var.as_ref()) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            match list_dir(&dir) {
                Ok(names) => {
                    for name in names {
                        index.push(dir.join(&name), name);
                    }
                }
                Err(e) => crate::debug!("skipping search path entry {}: {}", dir.display(), e),
            }
            index.dirs.push(dir);
        }
        crate::debug!(
            "indexed {} entries from {} directories",
            index.entries.len(),
            index.dirs.len()
        );
        index
    }

    fn push(&mut self, path: PathBuf, name: OsString) {
        let position = self.entries.len();
        self.first_by_name.entry(name).or_insert(position);
        self.entries.push(path);
    }

    /// Full path of the first entry named exactly `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.first_by_name
            .get(OsStr::new(name))
            .map(|&i| self.entries[i].as_path())
    }

    /// Directories of the search path in order, including unreadable ones.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Names of the direct children of `dir`, sorted so that the index does not
/// depend on the order the filesystem happens to return them in.
fn list_dir(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}
