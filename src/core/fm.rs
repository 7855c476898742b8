//! File and directory browsing logic for fbrowse.
//!
//! Provides the [EntryRef] struct which is used throughout fbrowse,
//! the [EntryKind] classification and the on-demand [EntryDetails] lookup
//! used by the details pane.

use crate::core::error::{FmError, FmResult};
use crate::core::formatter::format_attributes;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs::{self, symlink_metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem-level classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    RegularFile,
    Symlink,
    NamedPipe,
    Socket,
    Device,
    Other,
}

impl EntryKind {
    /// Classifies a [fs::FileType]. Links are not followed.
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            return EntryKind::Symlink;
        }
        if ft.is_dir() {
            return EntryKind::Directory;
        }
        if ft.is_file() {
            return EntryKind::RegularFile;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if ft.is_fifo() {
                return EntryKind::NamedPipe;
            }
            if ft.is_socket() {
                return EntryKind::Socket;
            }
            if ft.is_block_device() || ft.is_char_device() {
                return EntryKind::Device;
            }
        }

        EntryKind::Other
    }

    #[inline]
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

/// Represents a single entry in a directory listing.
///
/// Created by [browse_dir] and thrown away on the next load.
#[derive(Debug, Clone)]
pub struct EntryRef {
    name: Box<OsStr>,
    kind: EntryKind,
}

impl EntryRef {
    pub fn new(name: OsString, kind: EntryKind) -> Self {
        EntryRef {
            name: name.into_boxed_os_str(),
            kind,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Metadata of one entry, computed on demand for the selected entry only.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetails {
    name: OsString,
    kind: EntryKind,
    size: u64,
    permissions: String,
    uid: Option<u32>,
    gid: Option<u32>,
    modified: Option<SystemTime>,
    link_target: Option<PathBuf>,
}

impl EntryDetails {
    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn permissions(&self) -> &str {
        &self.permissions
    }

    #[inline]
    pub fn uid(&self) -> Option<u32> {
        self.uid
    }

    #[inline]
    pub fn gid(&self) -> Option<u32> {
        self.gid
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn link_target(&self) -> Option<&Path> {
        self.link_target.as_deref()
    }

    /// Stats a single path without following symlinks.
    ///
    /// # Returns
    /// The populated details, or [FmError::StatFailed] if the entry is gone or unreadable.
    pub fn stat(path: &Path) -> FmResult<EntryDetails> {
        let metadata = symlink_metadata(path).map_err(|source| FmError::StatFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let kind = EntryKind::from_file_type(metadata.file_type());

        #[cfg(unix)]
        let (uid, gid) = {
            use std::os::unix::fs::MetadataExt;
            (Some(metadata.uid()), Some(metadata.gid()))
        };
        #[cfg(not(unix))]
        let (uid, gid) = (None, None);

        let link_target = if kind == EntryKind::Symlink {
            fs::read_link(path).ok()
        } else {
            None
        };

        Ok(EntryDetails {
            name: path.file_name().unwrap_or_default().to_os_string(),
            kind,
            size: metadata.len(),
            permissions: format_attributes(&metadata),
            uid,
            gid,
            modified: metadata.modified().ok(),
            link_target,
        })
    }
}

/// Orders entries: directories first, then everything else, each by name in byte order.
pub fn compare_entries(a: &EntryRef, b: &EntryRef) -> Ordering {
    match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name().cmp(b.name()),
    }
}

/// Reads the contents of the provided directory and returns them sorted.
///
/// Entries whose type cannot be determined are skipped.
/// # Returns
/// The sorted entries or [FmError::Unreadable] if the directory cannot be listed.
pub fn browse_dir(path: &Path) -> FmResult<Vec<EntryRef>> {
    let unreadable = |source| FmError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = Vec::with_capacity(64);
    for entry in fs::read_dir(path).map_err(unreadable)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        entries.push(EntryRef::new(
            entry.file_name(),
            EntryKind::from_file_type(ft),
        ));
    }

    entries.sort_by(compare_entries);
    Ok(entries)
}
