// src/ui.rs
use ratatui::{layout::Margin, prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::filesystem::FileEntry;
use crate::picker::DirectoryPicker;
use crate::utils::format::{format_modified, format_size};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(f.size());

    draw_path_field(f, app, chunks[0]);
    draw_listing(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);

    if let Some(picker) = app.picker.as_ref() {
        draw_picker(f, picker);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_path_field(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Path && app.picker.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(" Directory ")
        .title(block::Title::from(" Ctrl-O: select ").alignment(Alignment::Right));

    let inner_width = area.width.saturating_sub(2) as usize;
    let before_cursor: String = app.input.text().chars().take(app.input.cursor()).collect();
    let cursor_col = Line::from(before_cursor.as_str()).width();
    // Keep the cursor in view on long paths.
    let scroll = cursor_col.saturating_sub(inner_width.saturating_sub(1));

    let field = Paragraph::new(app.input.text())
        .block(block)
        .scroll((0, scroll as u16));
    f.render_widget(field, area);

    if focused {
        f.set_cursor(area.x + 1 + (cursor_col - scroll) as u16, area.y + 1);
    }
}

fn entry_item<'a>(entry: &'a FileEntry, app: &'a App) -> ListItem<'a> {
    let (icon, style) = if entry.is_dir {
        (app.config.dir_icon.as_str(), Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
    } else {
        (app.config.file_icon.as_str(), Style::default())
    };
    ListItem::new(Line::from(vec![
        Span::raw(icon),
        Span::raw(" "),
        Span::styled(entry.name.as_str(), style),
    ]))
}

fn draw_listing(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::List && app.picker.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(format!(" {} entries ", app.model.entries().len()));

    if app.model.entries().is_empty() {
        let hint = if app.model.path().is_empty() {
            "Type a directory and press Enter, or drop a file here."
        } else {
            "(empty)"
        };
        let placeholder = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let view: &App = app;
    let items: Vec<ListItem> = view.model.entries().iter().map(|e| entry_item(e, view)).collect();
    let len = items.len();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut list_state = app.list_state.clone();
    f.render_stateful_widget(list, area, &mut list_state);
    app.list_state = list_state;

    let mut scrollbar_state = ScrollbarState::new(len).position(app.list_state.selected().unwrap_or(0));
    f.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(&Margin { vertical: 1, horizontal: 0 }),
        &mut scrollbar_state,
    );
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.status, app.selected().and_then(|i| app.model.entries().get(i))) {
        (Some(message), _) => message.clone(),
        (None, Some(entry)) if entry.is_dir => {
            format!(" {}/  {}", entry.name, format_modified(entry.modified))
        }
        (None, Some(entry)) => format!(
            " {}  {}  {}",
            entry.name,
            format_size(entry.size),
            format_modified(entry.modified)
        ),
        (None, None) => " Tab: switch focus  Enter: open  Backspace: up  q: quit".to_string(),
    };
    f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::Gray)), area);
}

fn draw_picker(f: &mut Frame, picker: &DirectoryPicker) {
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} ", picker.current.display()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = picker
        .dirs
        .iter()
        .map(|d| ListItem::new(d.name.as_str()))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !picker.dirs.is_empty() {
        state.select(Some(picker.selected));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    let hint = Paragraph::new("Enter: choose  Space: this folder  ←/→: up/into  Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[1]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::TempDir;

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_listing_renders_names() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        let config = Config { dir_icon: "D".into(), file_icon: "F".into(), ..Config::default() };
        let mut app = App::new(config);
        app.change_directory(&tmp.path().to_string_lossy());

        let screen = rendered(&mut app);
        assert!(screen.contains("D docs"));
        assert!(screen.contains("F notes.txt"));
        assert!(screen.contains("2 entries"));
    }

    #[test]
    fn test_empty_model_shows_hint() {
        let mut app = App::new(Config::default());
        let screen = rendered(&mut app);
        assert!(screen.contains("Type a directory"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 60, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 20);
    }
}
