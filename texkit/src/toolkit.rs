//! The unit registry and flush logic.
//!
//! A [`TexToolkit`] collects units keyed by their [`UnitId`] and writes them
//! out in one go:
//! - Units keep their registration order
//! - Re-registering an id replaces the unit in its original slot
//! - Units are grouped per output file, each file is written once
//! - Units routed to a handler are passed to it during flush
//!
//! # Example
//!
//! ```ignore
//! let mut tex = TexToolkit::new();
//!
//! tex.newcommand("runs", 10);
//! tex.texstring_to("table", table_tex, "tables.tex");
//!
//! // writes values.tex and tables.tex
//! tex.flush("values.tex")?;
//! ```

use std::{
    fmt,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Component, Path, PathBuf},
};

use indexmap::IndexMap;
use texkit_core::{Error, ResolvedTarget, Result, Serializable, UnitId};
use tracing::{debug, trace};

use crate::mixins::Toolkit;

/// Line terminator appended to every serialized unit.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator appended to every serialized unit.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Registry of serializable units.
///
/// The registry is not synchronized: sharing one toolkit between threads that
/// add units requires wrapping it in a `Mutex`.
#[derive(Default)]
pub struct TexToolkit {
    units: IndexMap<UnitId, Box<dyn Serializable>>,
}

impl TexToolkit {
    /// Create a new empty toolkit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the toolkit is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get a unit by id.
    pub fn get(&self, id: &UnitId) -> Option<&dyn Serializable> {
        self.units.get(id).map(Box::as_ref)
    }

    /// Check if a unit with the given id is registered.
    pub fn contains(&self, id: &UnitId) -> bool {
        self.units.contains_key(id)
    }

    /// Iterate over units in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Serializable> {
        self.units.values().map(Box::as_ref)
    }

    /// Remove a unit, keeping the order of the remaining ones.
    pub fn remove(&mut self, id: &UnitId) -> Option<Box<dyn Serializable>> {
        self.units.shift_remove(id)
    }

    /// Remove all units.
    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// Preview the files flush would write to (path and content pairs).
    ///
    /// Units routed to handlers are not part of the preview and handlers are
    /// not invoked.
    pub fn preview(&self, default_path: impl AsRef<Path>) -> Vec<PreviewEntry> {
        let default_path = default_path.as_ref();
        self.group_files(default_path)
            .into_iter()
            .map(|(path, entries)| PreviewEntry {
                path: path.to_path_buf(),
                content: render_entries(&entries),
            })
            .collect()
    }

    /// Serialize all units.
    ///
    /// Units without an explicit target are written to `default_path`. Units
    /// routed to a handler are passed to it immediately, in registration
    /// order. All file contents are written after every unit was dispatched,
    /// one write per file.
    ///
    /// # Errors
    ///
    /// - [`Error::TargetConflict`] if `default_path` exists but is not a
    ///   writable regular file. Nothing is written and no handler is invoked.
    /// - [`Error::Handler`] with the handler's own error if a handler fails.
    /// - [`Error::Io`] if a file cannot be written. Files written before the
    ///   failure are left in place.
    ///
    /// The toolkit itself is never modified, so a failed flush can be retried.
    pub fn flush(&self, default_path: impl AsRef<Path>) -> Result<FlushStats> {
        let default_path = default_path.as_ref();
        check_default_path(default_path)?;

        let mut stats = FlushStats {
            units: self.units.len(),
            ..FlushStats::default()
        };
        let mut groups = FileGroups::default();

        for (id, unit) in &self.units {
            match unit.target().resolve(default_path) {
                ResolvedTarget::Handler(handler) => {
                    debug!(unit = %id, "dispatching to handler");
                    handler.serialize(&**unit).map_err(Error::Handler)?;
                    stats.handled += 1;
                }
                ResolvedTarget::File(path) => {
                    trace!(unit = %id, path = %path.display(), "grouping");
                    groups.push(path, unit.serialize());
                }
            }
        }

        for (path, entries) in groups.into_files() {
            write_entries(path, &entries)?;
            debug!(path = %path.display(), entries = entries.len(), "wrote file");
            stats.written_paths.push(path.to_path_buf());
        }

        Ok(stats)
    }

    fn group_files<'a>(&'a self, default_path: &'a Path) -> Vec<(&'a Path, Vec<String>)> {
        let mut groups = FileGroups::default();
        for unit in self.units.values() {
            if let ResolvedTarget::File(path) = unit.target().resolve(default_path) {
                groups.push(path, unit.serialize());
            }
        }
        groups.into_files()
    }
}

impl Toolkit for TexToolkit {
    fn add_boxed(&mut self, unit: Box<dyn Serializable>) -> &mut Self {
        let id = unit.id();
        trace!(unit = %id, "registering");
        // IndexMap::insert keeps the slot of an existing key
        self.units.insert(id, unit);
        self
    }
}

impl fmt::Debug for TexToolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TexToolkit")
            .field("units", &self.units.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a TexToolkit {
    type Item = &'a dyn Serializable;
    type IntoIter = Box<dyn Iterator<Item = &'a dyn Serializable> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A preview entry for displaying what would be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// Resolved output path.
    pub path: PathBuf,
    /// File content.
    pub content: String,
}

/// Statistics from a flush.
#[derive(Debug, Default)]
pub struct FlushStats {
    /// Number of units processed.
    pub units: usize,
    /// Number of handler invocations.
    pub handled: usize,
    /// Paths of written files, in write order.
    pub written_paths: Vec<PathBuf>,
}

impl FlushStats {
    /// Number of files written.
    pub fn written(&self) -> usize {
        self.written_paths.len()
    }
}

/// Serialized entries per output file, in first-seen order.
///
/// Paths that only differ by `.` components (`out.tex`, `./out.tex`) name
/// the same file and share a group, reported under the first spelling seen.
#[derive(Default)]
struct FileGroups<'a> {
    files: IndexMap<PathBuf, (&'a Path, Vec<String>)>,
}

impl<'a> FileGroups<'a> {
    fn push(&mut self, path: &'a Path, entry: String) {
        let key = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        self.files
            .entry(key)
            .or_insert_with(|| (path, Vec::new()))
            .1
            .push(entry);
    }

    fn into_files(self) -> Vec<(&'a Path, Vec<String>)> {
        self.files.into_values().collect()
    }
}

/// The default output must be absent or a writable regular file.
fn check_default_path(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => Err(Error::target_conflict(
            path,
            "exists and is not a regular file",
        )),
        Ok(meta) if meta.permissions().readonly() => {
            Err(Error::target_conflict(path, "file is read-only"))
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn render_entries(entries: &[String]) -> String {
    let mut content = String::new();
    for entry in entries {
        content.push_str(entry);
        content.push_str(LINE_ENDING);
    }
    content
}

fn write_entries(path: &Path, entries: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    for entry in entries {
        out.write_all(entry.as_bytes())
            .and_then(|()| out.write_all(LINE_ENDING.as_bytes()))
            .map_err(|e| Error::io(path, e))?;
    }
    out.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}
