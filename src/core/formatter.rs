//! Display formatting for entry metadata in fbrowse.
//!
//! Formats permissions, kinds, sizes and timestamps for the details pane.

use crate::core::EntryKind;

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::UnicodeWidthChar;

use std::fs::Metadata;
use std::time::SystemTime;

/// Formats the file attributes in a unix-like format, like `drwxr-xr-x`.
///
/// The first character encodes the kind (`d`, `l`, `p`, `s`, `b`, `c` or `-`).
/// On Windows only the kind and a read-only flag are available, so the output is shorter.
pub fn format_attributes(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{FileTypeExt, PermissionsExt};

        let ft = meta.file_type();
        let first = if ft.is_dir() {
            'd'
        } else if ft.is_symlink() {
            'l'
        } else if ft.is_fifo() {
            'p'
        } else if ft.is_socket() {
            's'
        } else if ft.is_block_device() {
            'b'
        } else if ft.is_char_device() {
            'c'
        } else {
            '-'
        };
        let mode = meta.permissions().mode();
        let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
        let shifts = [6, 3, 0];
        for (i, &shift) in shifts.iter().enumerate() {
            let base = 1 + i * 3;
            if (mode >> (shift + 2)) & 1u32 != 0 {
                chars[base] = 'r';
            }
            if (mode >> (shift + 1)) & 1u32 != 0 {
                chars[base + 1] = 'w';
            }
            if (mode >> shift) & 1u32 != 0 {
                chars[base + 2] = 'x';
            }
        }
        chars.iter().collect()
    }
    #[cfg(not(unix))]
    {
        let ft = meta.file_type();
        let mut out = String::with_capacity(2);
        out.push(if ft.is_dir() {
            'd'
        } else if ft.is_symlink() {
            'l'
        } else {
            '-'
        });
        out.push(if meta.permissions().readonly() { 'r' } else { 'w' });
        out
    }
}

/// Formats the [EntryKind] into a human-readable string.
pub fn format_file_type(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "Directory",
        EntryKind::RegularFile => "File",
        EntryKind::Symlink => "Symlink",
        EntryKind::NamedPipe => "Named Pipe",
        EntryKind::Socket => "Socket",
        EntryKind::Device => "Device",
        EntryKind::Other => "Other",
    }
}

/// Formats a byte count as `"<n> bytes"`, with a human readable size appended from 1 kB on.
pub fn format_file_size(size: u64) -> String {
    if size < 1000 {
        format!("{} bytes", size)
    } else {
        format!("{} bytes ({})", size, format_size(size, DECIMAL))
    }
}

/// Formats the modification time in the RFC 1123 layout, or "-" if unknown.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%a, %d %b %Y %H:%M:%S %Z").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Makes a file name safe to draw in at most `max_width` columns.
///
/// Control characters are dropped and tabs become a single space. Names that do not fit
/// are cut and end with `~`.
pub fn sanitize_name(name: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(name.len().min(max_width));
    let mut current_w = 0;
    let mut truncated = false;

    for ch in name.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if current_w + w > max_width {
            truncated = true;
            break;
        }
        out.push(ch);
        current_w += w;
    }

    if truncated && max_width > 0 {
        while current_w + 1 > max_width {
            match out.pop() {
                Some(c) => current_w -= c.width().unwrap_or(0),
                None => break,
            }
        }
        out.push('~');
    }
    out
}
