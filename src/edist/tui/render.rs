use super::browse::BrowseView;
use super::theme::Theme;
use super::{ProgramState, StatusLevel};
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MARGIN: Margin = Margin {
    horizontal: 2,
    vertical: 1,
};
/// Title bar, filter/status line, blank line, help line
const CHROME_ROWS: u16 = 4;
/// Two text lines plus a spacer
const ENTRY_ROWS: u16 = 3;
const MARKER: &str = "│ ";
const HELP: &str = "↑/k up • ↓/j down • / filter • enter edit • q quit";
const FILTER_HELP: &str = "enter apply • esc cancel";

/// How many list entries fit in a terminal of the given size.
pub fn entries_for(width: u16, height: u16) -> usize {
    let inner = Rect::new(0, 0, width, height).inner(MARGIN);
    (inner.height.saturating_sub(CHROME_ROWS) / ENTRY_ROWS) as usize
}

pub fn draw(frame: &mut Frame, state: &ProgramState, theme: &Theme) {
    let area = frame.area().inner(MARGIN);
    let [title, status, _, list, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let view = &state.view;
    frame.render_widget(title_bar(view, theme), title);
    frame.render_widget(status_line(state, theme, status.width), status);
    frame.render_widget(entry_list(view, theme), list);

    let help_text = if view.is_filtering() { FILTER_HELP } else { HELP };
    frame.render_widget(Paragraph::new(Span::styled(help_text, theme.help)), help);
}

fn title_bar<'a>(view: &BrowseView, theme: &Theme) -> Paragraph<'a> {
    let count = if view.visible_len() == view.catalog().len() {
        format!("  {} notes", view.catalog().len())
    } else {
        format!("  {}/{} notes", view.visible_len(), view.catalog().len())
    };
    Paragraph::new(Line::from(vec![
        Span::styled(" EDIST ", theme.title),
        Span::styled(count, theme.count),
    ]))
}

/// The filter prompt while typing, otherwise the status message, otherwise
/// the applied filter.
fn status_line<'a>(state: &'a ProgramState, theme: &Theme, width: u16) -> Paragraph<'a> {
    let view = &state.view;
    let filter_line = || {
        Paragraph::new(Line::from(vec![
            Span::styled("Filter: ", theme.filter_prompt),
            Span::styled(view.filter(), theme.filter_text),
        ]))
    };
    if view.is_filtering() {
        return filter_line();
    }

    match &state.status {
        Some(status) => {
            let style = match status.level {
                StatusLevel::Notice => theme.status_notice,
                StatusLevel::Error => theme.status_error,
            };
            let text = truncate_to_width(&status.text, width as usize);
            Paragraph::new(Span::styled(text, style))
        }
        None if !view.filter().is_empty() => filter_line(),
        None => Paragraph::new(""),
    }
}

fn entry_list<'a>(view: &'a BrowseView, theme: &Theme) -> List<'a> {
    if view.catalog().is_empty() {
        return List::new([ListItem::new(Span::styled("No notes found.", theme.empty))]);
    }
    if view.visible_len() == 0 {
        return List::new([ListItem::new(Span::styled("Nothing matched.", theme.empty))]);
    }

    let items: Vec<ListItem> = view
        .page()
        .map(|(bundle, selected)| {
            let (marker, title_style, desc_style) = if selected {
                (
                    Span::styled(MARKER, theme.selection_marker),
                    theme.selected_title,
                    theme.selected_description,
                )
            } else {
                (Span::raw("  "), theme.item_title, theme.item_description)
            };
            ListItem::new(vec![
                Line::from(vec![
                    marker.clone(),
                    Span::styled(bundle.display_name(), title_style),
                ]),
                Line::from(vec![
                    marker,
                    Span::styled(bundle.description(), desc_style),
                ]),
                Line::default(),
            ])
        })
        .collect();
    List::new(items)
}

/// Cuts `text` to at most `max` columns, ending in an ellipsis when cut.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
