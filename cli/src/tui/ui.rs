use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use fmds_core::TimerStatus;

use crate::tui::app::App;

const TITLE_WIDTH: usize = 32;

pub fn draw(f: &mut Frame, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(f.area());

    let header = Paragraph::new(format!("FMDS  ·  {}  ·  {}", app.day(), app.window_label))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_agenda(f, app, content_chunks[0]);
    draw_timer(f, app, content_chunks[1]);

    let footer = Paragraph::new("j/k: Select | Enter: Start | Space: Pause | s: Stop | ←/→: Day | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn draw_agenda(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} agenda ", app.day()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if app.view.is_empty() {
        let empty = Paragraph::new(format!("No meetings scheduled for {}", app.day()))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let active = app.timer.is_active().then_some(app.timer.segment_index);
    let rows: Vec<Row> = app
        .view
        .segments
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let time = match (item.start_time(), item.end_time()) {
                (Some(s), Some(e)) => format!("{s}-{e}"),
                (Some(s), None) => s.to_string(),
                _ => "--:--".to_string(),
            };
            let marker = if active == Some(i) { "▶" } else { " " };
            let title_style = if item.effective.overridden {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::raw(time),
                Span::raw(format!("{}m", item.duration())),
                Span::styled(truncate(item.title(), TITLE_WIDTH), title_style),
            ])
        })
        .collect();

    let footer = Row::new(vec![
        String::new(),
        "Total".to_string(),
        format!("{}m", app.view.total_duration),
        format!("{} segments", app.view.activity_count),
    ])
    .style(Style::default().fg(Color::DarkGray));

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(11),
            Constraint::Length(5),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(vec!["", "Time", "Min", "Segment"]).style(Style::default().fg(Color::Yellow)))
    .footer(footer)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_timer(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let (status, color) = match app.timer.status {
        TimerStatus::Idle => ("Ready", Color::DarkGray),
        TimerStatus::Running => ("Running", Color::Green),
        TimerStatus::Paused => ("Paused", Color::Yellow),
        TimerStatus::Finished => ("Time's up", Color::Red),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            app.active_title().unwrap_or("Select a segment and press Enter"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.timer.display(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(status, Style::default().fg(color))),
    ];
    if let Some(message) = &app.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Blue))));
    }

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Timer ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(panel, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .gauge_style(Style::default().fg(color))
        .ratio(app.timer.progress().clamp(0.0, 1.0));
    f.render_widget(gauge, chunks[1]);
}

/// Cuts `text` to at most `width` terminal columns, marking the cut with "…".
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Standup", 10), "Standup");
        assert_eq!(truncate("Backlog Review", 8), "Backlog…");
        // wide characters take two columns each
        assert_eq!(truncate("日本語の会議", 7), "日本語…");
        assert!(truncate("日本語の会議", 7).width() <= 7);
    }
}
