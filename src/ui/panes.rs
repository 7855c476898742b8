//! Pane rendering for fbrowse.
//!
//! Draws the entry list and the details pane of the selected entry.

use crate::app::AppState;
use crate::config::Theme;
use crate::core::{
    EntryDetails, EntryRef, FmResult, format_file_size, format_file_time, format_file_type,
    sanitize_name,
};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Draws the main file list pane.
///
/// Directories get a trailing `/`, the selection is highlighted with the theme's
/// selection style and the list scrolls to keep it visible.
pub fn draw_entries(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.config().theme();
    let view = app.view();
    let block = Block::default().borders(Borders::RIGHT);

    if view.is_empty() {
        frame.render_widget(Paragraph::new(" [Empty]").block(block), area);
        return;
    }

    // borders + padding
    let name_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = view
        .entries()
        .iter()
        .map(|entry| entry_row(entry, theme, name_width))
        .collect();

    let mut state = ListState::default();
    state.select(view.selected());

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(theme.selection_style())
            .scroll_padding(2),
        area,
        &mut state,
    );
}

fn entry_row<'a>(entry: &EntryRef, theme: &Theme, width: usize) -> ListItem<'a> {
    let name_width = width.saturating_sub(entry.is_dir() as usize);
    let mut name = sanitize_name(&entry.name_str(), name_width);
    if entry.is_dir() {
        name.push('/');
    }
    ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(name, theme.entry_style(entry.kind())),
    ]))
}

/// Draws the details pane for the selected entry.
///
/// Nothing is drawn for an empty directory. A failed stat shows the error instead.
pub fn draw_details(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.config().theme();
    let Some(details) = app.details() else {
        return;
    };

    let lines = details_lines(&details, theme);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().title(" Details "))
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Builds the label/value lines of the details pane.
pub fn details_lines<'a>(details: &FmResult<EntryDetails>, theme: &Theme) -> Vec<Line<'a>> {
    let details = match details {
        Ok(details) => details,
        Err(e) => {
            return vec![
                Line::styled(" Error retrieving details", theme.error_style()),
                Line::styled(format!(" {}", e), theme.error_style()),
            ];
        }
    };

    let label_style = theme.label_style();
    let value_style = Style::default();
    let mut lines: Vec<Line> = Vec::with_capacity(8);

    let mut add_line = |label: &str, value: String| {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<13}", label), label_style),
            Span::styled(value, value_style),
        ]));
    };

    add_line("Name:", details.name().to_string_lossy().into_owned());
    add_line("Type:", format_file_type(details.kind()).into());
    add_line("Size:", format_file_size(details.size()));
    add_line("Permissions:", details.permissions().to_string());
    if let Some(uid) = details.uid() {
        add_line("Owner:", uid.to_string());
    }
    if let Some(gid) = details.gid() {
        add_line("Group:", gid.to_string());
    }
    add_line("Modified:", format_file_time(details.modified()));
    if let Some(target) = details.link_target() {
        add_line("Points to:", target.display().to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FmError;

    use std::{error, fs, io};
    use tempfile::tempdir;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn details_lines_for_file() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello")?;

        let lines = details_lines(&EntryDetails::stat(&path), &Theme::default());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert!(text[0].contains("notes.txt"));
        assert!(text.iter().any(|l| l.contains("Type:") && l.contains("File")));
        assert!(text.iter().any(|l| l.contains("5 bytes")));
        assert!(!text.iter().any(|l| l.contains("Points to:")));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn details_lines_owner_and_group_rows() -> Result<(), Box<dyn error::Error>> {
        use std::os::unix::fs::MetadataExt;

        let dir = tempdir()?;
        let path = dir.path().join("owned.txt");
        fs::write(&path, b"")?;
        let meta = fs::symlink_metadata(&path)?;

        let theme = Theme::default();
        let lines = details_lines(&EntryDetails::stat(&path), &theme);
        let owner = lines
            .iter()
            .find(|l| line_text(l).contains("Owner:"))
            .ok_or("missing owner row")?;
        let group = lines
            .iter()
            .find(|l| line_text(l).contains("Group:"))
            .ok_or("missing group row")?;
        assert!(line_text(owner).ends_with(&format!(" {}", meta.uid())));
        assert!(line_text(group).ends_with(&format!(" {}", meta.gid())));
        assert_eq!(owner.spans[0].style, theme.label_style());
        Ok(())
    }

    #[test]
    fn details_lines_for_error() {
        let err: FmResult<EntryDetails> = Err(FmError::StatFailed {
            path: "/gone".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });
        let lines = details_lines(&err, &Theme::default());
        assert_eq!(line_text(&lines[0]).trim(), "Error retrieving details");
        assert!(line_text(&lines[1]).contains("/gone"));
    }
}
