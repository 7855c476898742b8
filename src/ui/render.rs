//! UI renderer implementation.
//!
//! Contains the top-level [render] entry point used by the terminal loop and the
//! layout helper that splits the screen into header, panes and status line.
//!
//! Pure rendering: it reads the state and config and produces widgets.

use crate::app::{AppState, StatusKind};
use crate::ui::panes;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Screen regions: path header, entry list, details pane and status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub entries: Rect,
    pub details: Rect,
    pub status: Rect,
}

/// Render function which draws the entire UI on each frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let layout = layout_chunks(frame.area());

    render_header(frame, app, layout.header);
    panes::draw_entries(frame, app, layout.entries);
    panes::draw_details(frame, app, layout.details);
    render_status(frame, app, layout.status);
}

/// Splits `area` into a one line header, two equal panes and a one line status bar.
pub fn layout_chunks(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    ScreenLayout {
        header: rows[0],
        entries: panes[0],
        details: panes[1],
        status: rows[2],
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.config().theme();
    let path_str = shorten_home_path(app.view().path());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(path_str, theme.path_style()),
        ])),
        area,
    );
}

/// Status line: the last message if any, else the selection position.
fn render_status(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.config().theme();
    let view = app.view();

    let line = match app.status() {
        Some(msg) => {
            let style = match msg.kind() {
                StatusKind::Info => theme.status_style(),
                StatusKind::Error => theme.error_style(),
            };
            Line::styled(format!(" {}", msg.text()), style)
        }
        None => {
            let pos = view.selected().map_or(0, |idx| idx + 1);
            Line::styled(
                format!(" {}/{}", pos, view.entries().len()),
                theme.status_style(),
            )
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
