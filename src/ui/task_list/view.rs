use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::filter::Filter;
use crate::notify::{Notification, Severity};

use super::model::{Focus, Row, ViewModel, EMPTY_STATE};

const PLACEHOLDER: &str = "Enter task description...";
const FOOTER_TEXT: &str = "All tasks are saved locally";
const TOAST_WIDTH: u16 = 44;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, model: &ViewModel) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(frame, chunks[0]);
    render_input(frame, model, chunks[1]);
    render_filters(frame, model, chunks[2]);
    render_list(frame, model, chunks[3]);
    render_footer(frame, model, chunks[4]);
    render_notifications(frame, &model.notifications, area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Task Manager",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Manage your tasks efficiently",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_input(frame: &mut Frame, model: &ViewModel, area: Rect) {
    let focused = model.focus == Focus::Input;
    let width = usize::from(area.width.saturating_sub(2));
    let (start, end) = input_window(model.input.chars().count(), model.cursor, width);
    let content = if model.input.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(COLOR_MUTED_DARK)))
    } else {
        let visible: String = model.input.chars().skip(start).take(end - start).collect();
        Line::from(Span::styled(visible, Style::default().fg(COLOR_TEXT)))
    };
    let border = if focused { COLOR_ACCENT } else { COLOR_BG_MUTED };
    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task (enter to add)")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);

    if focused && width > 0 && area.height > 2 {
        let column = model.cursor.saturating_sub(start).min(width - 1);
        let offset = u16::try_from(column).unwrap_or(u16::MAX);
        frame.set_cursor(area.x.saturating_add(1).saturating_add(offset), area.y + 1);
    }
}

/// Char range of the input shown in `width` columns, keeping the caret in view.
fn input_window(len: usize, cursor: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let cursor = cursor.min(len);
    let start = cursor.saturating_add(1).saturating_sub(width);
    (start, start.saturating_add(width).min(len))
}

fn render_filters(frame: &mut Frame, model: &ViewModel, area: Rect) {
    let mut spans = Vec::new();
    for (idx, filter) in Filter::ALL.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{} ({})", filter.label(), model.counts.get(filter)),
            filter_style(filter == model.filter),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn filter_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(COLOR_MUTED)
    }
}

fn render_list(frame: &mut Frame, model: &ViewModel, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Tasks")
        .border_style(Style::default().fg(COLOR_BORDER_LIST));

    if model.is_empty() {
        let widget = Paragraph::new(Line::from(Span::styled(
            EMPTY_STATE,
            Style::default().fg(COLOR_MUTED),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = list_window(model.rows.len(), model.selected, height);
    let list_focused = model.focus == Focus::List;
    let lines: Vec<Line> = model.rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let selected = list_focused && model.selected == Some(start + offset);
            render_row(row, selected)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_row(row: &Row, selected: bool) -> Line<'_> {
    let marker = if selected { "› " } else { "  " };
    let checkbox = if row.is_completed { "[x] " } else { "[ ] " };
    let description_style = if row.is_completed {
        Style::default()
            .fg(COLOR_MUTED_DARK)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    let delete_style = if selected {
        Style::default().fg(COLOR_ERROR)
    } else {
        Style::default().fg(COLOR_BG_MUTED)
    };

    let mut line = Line::from(vec![
        Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
        Span::styled(checkbox, Style::default().fg(COLOR_MUTED)),
        Span::styled(row.description.as_str(), description_style),
        Span::raw("  "),
        Span::styled("✕", delete_style),
    ]);
    if selected {
        line = line.style(Style::default().bg(COLOR_BG_MUTED));
    }
    line
}

/// Visible window of `len` rows keeping `selected` in view.
fn list_window(len: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if height == 0 || len <= height {
        return (0, len);
    }
    let selected = selected.unwrap_or(0);
    let start = selected.saturating_sub(height - 1);
    (start, (start + height).min(len))
}

fn render_footer(frame: &mut Frame, model: &ViewModel, area: Rect) {
    let hint = match model.focus {
        Focus::Input => "type to edit  enter add  tab list  esc list  ctrl-c quit",
        Focus::List => {
            "j/k move  space toggle  d delete  1/2/3 filter  a add  tab input  q quit"
        }
    };
    let lines = vec![
        Line::from(Span::styled(FOOTER_TEXT, Style::default().fg(COLOR_MUTED))),
        Line::from(Span::styled(hint, Style::default().fg(COLOR_MUTED_DARK))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_notifications(frame: &mut Frame, notifications: &[Notification], area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y;
    // Newest on top.
    for notification in notifications.iter().rev() {
        let height = 4;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };
        render_toast(frame, notification, rect);
        y += height;
    }
}

fn render_toast(frame: &mut Frame, notification: &Notification, area: Rect) {
    let color = match notification.severity {
        Severity::Success => COLOR_SUCCESS,
        Severity::Error => COLOR_ERROR,
    };
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            notification.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            notification.description.as_str(),
            Style::default().fg(COLOR_TEXT),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCounts;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn row(id: &str, description: &str, is_completed: bool) -> Row {
        Row {
            id: id.to_string(),
            description: description.to_string(),
            is_completed,
        }
    }

    fn model(rows: Vec<Row>, filter: Filter, counts: FilterCounts) -> ViewModel {
        ViewModel {
            input: String::new(),
            cursor: 0,
            focus: Focus::List,
            filter,
            counts,
            selected: if rows.is_empty() { None } else { Some(0) },
            rows,
            notifications: Vec::new(),
        }
    }

    fn draw(model: &ViewModel) -> Buffer {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(frame, model)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|cells| cells.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_rows_and_counts() {
        let rows = vec![row("1", "Buy milk", false), row("2", "Walk dog", true)];
        let counts = FilterCounts {
            all: 2,
            active: 1,
            completed: 1,
        };
        let screen = text(&draw(&model(rows, Filter::All, counts)));

        assert!(screen.contains("Task Manager"));
        assert!(screen.contains("All (2)"));
        assert!(screen.contains("Active (1)"));
        assert!(screen.contains("Completed (1)"));
        assert!(screen.contains("[ ] Buy milk"));
        assert!(screen.contains("[x] Walk dog"));
        assert!(screen.contains(PLACEHOLDER));
        assert!(!screen.contains(EMPTY_STATE));
    }

    #[test]
    fn completed_rows_are_crossed_out() {
        let rows = vec![row("2", "Walk dog", true)];
        let buffer = draw(&model(rows, Filter::Completed, FilterCounts::default()));
        let screen = text(&buffer);

        let width = buffer.area.width as usize;
        let (y, line) = screen
            .lines()
            .enumerate()
            .find(|(_, line)| line.contains("Walk dog"))
            .expect("row drawn");
        let byte_offset = line.find("Walk dog").expect("column");
        // Every glyph before the description is one cell wide.
        let x = line[..byte_offset].chars().count();
        let cell = &buffer.content[y * width + x];
        assert!(cell.modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn empty_state_under_any_filter() {
        for filter in Filter::ALL {
            let counts = FilterCounts {
                all: 1,
                active: 1,
                completed: 0,
            };
            let screen = text(&draw(&model(Vec::new(), filter, counts)));
            assert!(screen.contains(EMPTY_STATE), "filter {filter}");
        }
    }

    #[test]
    fn notifications_are_drawn() {
        let mut view = model(Vec::new(), Filter::All, FilterCounts::default());
        view.notifications = vec![Notification::error("Task description cannot be empty")];
        let screen = text(&draw(&view));
        assert!(screen.contains("Error"));
        assert!(screen.contains("Task description cannot be"));
    }

    #[test]
    fn filter_labels_show_counts_only() {
        let counts = FilterCounts {
            all: 2,
            active: 1,
            completed: 1,
        };
        let screen = text(&draw(&model(Vec::new(), Filter::All, counts)));
        assert!(screen.contains("All (2)  Active (1)  Completed (1)"));
        assert!(!screen.contains("1 All"));
    }

    #[test]
    fn long_input_scrolls_to_caret() {
        let mut view = model(Vec::new(), Filter::All, FilterCounts::default());
        view.focus = Focus::Input;
        view.input = format!("{}END", "a".repeat(100));
        view.cursor = view.input.chars().count();

        let screen = text(&draw(&view));
        assert!(screen.contains("aaaEND"));
    }

    #[test]
    fn huge_input_draws_without_overflow() {
        let mut view = model(Vec::new(), Filter::All, FilterCounts::default());
        view.focus = Focus::Input;
        view.input = "a".repeat(70_000);
        view.cursor = 70_000;

        let screen = text(&draw(&view));
        assert!(screen.contains(&"a".repeat(70)));
    }

    #[test]
    fn input_window_follows_cursor() {
        // Caret at the end keeps one free column.
        assert_eq!(input_window(100, 100, 78), (23, 100));
        assert_eq!(input_window(10, 10, 78), (0, 10));
        assert_eq!(input_window(100, 0, 78), (0, 78));
        assert_eq!(input_window(100, 50, 10), (41, 51));
        assert_eq!(input_window(5, 99, 3), (3, 5));
        assert_eq!(input_window(5, 2, 0), (0, 0));
    }

    #[test]
    fn window_keeps_selection_visible() {
        assert_eq!(list_window(3, Some(2), 5), (0, 3));
        assert_eq!(list_window(10, Some(9), 4), (6, 10));
        assert_eq!(list_window(10, Some(1), 4), (0, 4));
        assert_eq!(list_window(10, None, 0), (0, 10));
    }
}
