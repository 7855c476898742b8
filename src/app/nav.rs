//! Directory view state for fbrowse.
//!
//! Manages the current directory, its sorted entries and the selection.
//! Provides loading, selection movement, navigation, going to the parent,
//! deletion and the on-demand details lookup for the selected entry.

use crate::core::{EntryDetails, EntryRef, FmError, FmResult, browse_dir};

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Direction for [DirectoryView::move_selection].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What activating an entry should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    EnterDirectory(PathBuf),
    OpenFile(PathBuf),
}

/// How [DirectoryView::delete] removes an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    Permanent,
    Trash,
}

/// Holds the path, the sorted entries and the selection of the displayed directory.
///
/// `selected` is `None` exactly when `entries` is empty.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    path: PathBuf,
    entries: Vec<EntryRef>,
    selected: Option<usize>,
}

impl DirectoryView {
    /// Lists `path` and selects the first entry.
    pub fn load(path: impl Into<PathBuf>) -> FmResult<Self> {
        let path = path.into();
        let entries = browse_dir(&path)?;
        let selected = if entries.is_empty() { None } else { Some(0) };
        Ok(Self {
            path,
            entries,
            selected,
        })
    }

    // Getters / Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_entry(&self) -> Option<&EntryRef> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    /// Full path of the entry at `index`, if it exists.
    pub fn entry_path(&self, index: usize) -> Option<PathBuf> {
        self.entries.get(index).map(|e| self.path.join(e.name()))
    }

    // Loading

    /// Loads `path` into this view. On failure the view is left untouched.
    pub fn enter(&mut self, path: PathBuf) -> FmResult<()> {
        *self = Self::load(path)?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "entered directory");
        Ok(())
    }

    /// Re-lists the current path, keeping the selection index clamped to the new length.
    pub fn refresh(&mut self) -> FmResult<()> {
        let entries = browse_dir(&self.path)?;
        self.selected = match (entries.len(), self.selected) {
            (0, _) => None,
            (len, Some(idx)) => Some(idx.min(len - 1)),
            (_, None) => Some(0),
        };
        self.entries = entries;
        Ok(())
    }

    // Selection

    /// Moves the selection one step, stopping at both ends.
    pub fn move_selection(&mut self, direction: Direction) {
        let Some(idx) = self.selected else {
            return;
        };
        self.selected = Some(match direction {
            Direction::Up => idx.saturating_sub(1),
            Direction::Down => (idx + 1).min(self.entries.len() - 1),
        });
    }

    fn select_name(&mut self, name: &OsStr) {
        if let Some(pos) = self.entries.iter().position(|e| e.name() == name) {
            self.selected = Some(pos);
        }
    }

    // Navigation

    /// Decides whether the entry at `index` is entered or opened.
    ///
    /// Symlinks are followed, so a link to a directory is entered.
    pub fn navigate(&self, index: usize) -> FmResult<NavTarget> {
        let path = self.entry_path(index).ok_or_else(|| FmError::StatFailed {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "no entry at this position"),
        })?;

        let meta = fs::metadata(&path).map_err(|source| FmError::StatFailed {
            path: path.clone(),
            source,
        })?;

        if meta.is_dir() {
            Ok(NavTarget::EnterDirectory(path))
        } else {
            Ok(NavTarget::OpenFile(path))
        }
    }

    /// Goes to the parent directory and focuses the directory that was left.
    ///
    /// The root is its own parent. Relative paths are resolved against the working
    /// directory first so that `.` has a parent too.
    pub fn navigate_up(&mut self) -> FmResult<()> {
        let current = if self.path.is_absolute() {
            self.path.clone()
        } else {
            fs::canonicalize(&self.path).map_err(|source| FmError::Unreadable {
                path: self.path.clone(),
                source,
            })?
        };

        let exited = current.file_name().map(OsStr::to_os_string);
        let parent = current
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| current.clone());

        self.enter(parent)?;
        if let Some(name) = exited {
            self.select_name(&name);
        }
        Ok(())
    }

    // Mutation

    /// Removes the entry at `index` (directory trees recursively) and reloads.
    ///
    /// Links are removed, never followed. On failure the view is unchanged.
    pub fn delete(&mut self, index: usize, mode: DeleteMode) -> FmResult<()> {
        let path = self.entry_path(index).ok_or_else(|| FmError::DeleteFailed {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "no entry at this position"),
        })?;

        remove_entry(&path, mode).map_err(|source| FmError::DeleteFailed {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), ?mode, "deleted entry");

        self.refresh()
    }

    // Details

    /// Stats the entry at `index` on demand.
    ///
    /// Returns `None` when nothing is selected, `Some(Err(StatFailed))` if the entry vanished.
    pub fn details_for(&self, index: Option<usize>) -> Option<FmResult<EntryDetails>> {
        let index = index?;
        Some(match self.entry_path(index) {
            Some(path) => EntryDetails::stat(&path),
            None => Err(FmError::StatFailed {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "no entry at this position"),
            }),
        })
    }
}

fn remove_entry(path: &Path, mode: DeleteMode) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    match mode {
        DeleteMode::Trash => trash::delete(path).map_err(|e| io::Error::other(e.to_string())),
        DeleteMode::Permanent if meta.is_dir() => fs::remove_dir_all(path),
        DeleteMode::Permanent => fs::remove_file(path),
    }
}
