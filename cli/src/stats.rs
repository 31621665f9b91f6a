use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Padding, Paragraph},
};
use fmds_core::{
    schedule::ScheduleInsights, Analytics, Config, DaySchedule, SegmentRepository, SegmentService, Weekday,
};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    bar: Color,
    selected: Color,
    warn: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    bar: Color::Blue,
    selected: Color::Green,
    warn: Color::Red,
};

pub struct Dashboard {
    pub analytics: Analytics,
    pub insights: ScheduleInsights,
    pub window_label: String,
    pub selected_day: Weekday,
}

impl Dashboard {
    pub fn new(analytics: Analytics, insights: ScheduleInsights, window_label: String) -> Self {
        let selected_day = analytics.most_busy_day.day;
        Self {
            analytics,
            insights,
            window_label,
            selected_day,
        }
    }

    pub fn next_day(&mut self) {
        self.selected_day = self.selected_day.next();
    }

    pub fn previous_day(&mut self) {
        self.selected_day = self.selected_day.previous();
    }

    pub fn selected(&self) -> Option<&DaySchedule> {
        self.analytics.day(self.selected_day)
    }
}

pub fn run<R: SegmentRepository>(service: &SegmentService<R>, config: &Config) -> Result<()> {
    let segments = service.list_segments()?;
    if segments.is_empty() {
        println!("No segments scheduled. Run `fmds seed` or `fmds add` first.");
        return Ok(());
    }
    let analytics = fmds_core::build_analytics(&segments);
    let insights = ScheduleInsights::new(&segments, &analytics, config.meeting.window_minutes());
    let mut app = Dashboard::new(analytics, insights, config.meeting.window_label());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut Dashboard) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &Dashboard) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + sidebar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1), Constraint::Length(30)])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "FMDS SCHEDULE",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav = Paragraph::new(Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(
            format!(" {} ", app.selected_day),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)),
        main_layout[0],
    );

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Length(1), Constraint::Percentage(35)])
        .split(main_layout[1]);

    draw_chart(frame, app, content[0]);
    draw_info_panel(frame, app, content[2]);

    let help = Line::from(vec![
        Span::styled("DAY: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_chart(frame: &mut Frame, app: &Dashboard, area: Rect) {
    let bars: Vec<Bar> = app
        .analytics
        .all_days_data
        .iter()
        .map(|view| {
            let color = if view.day == app.selected_day { THEME.selected } else { THEME.bar };
            Bar::default()
                .label(view.day.short())
                .value(u64::from(view.total_duration))
                .style(Style::default().fg(color))
                .text_value(format!("{}m", view.total_duration))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(format!(" Minutes per day (window {}) ", app.window_label)),
        )
        .bar_width(7)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars))
        .max(u64::from(app.insights.window_minutes.max(app.analytics.most_busy_day.total_duration)));

    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, app: &Dashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Week summary
            Constraint::Min(4),     // Selected day
            Constraint::Length(3),  // Coverage
        ])
        .split(area);

    let a = &app.analytics;
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(THEME.muted)),
            Span::styled(value, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        ])
    };
    let summary = vec![
        row("Segments", a.total_activities.to_string()),
        row("Weekly", format!("{} min", a.total_weekly_minutes)),
        row("Average", format!("{} min", a.average_duration)),
        row("Daily avg", format!("{} min", app.insights.daily_average)),
        row("Active", format!("{}/5 days", a.active_days)),
        row(
            "Busiest",
            format!("{} ({} min)", a.most_busy_day.day, a.most_busy_day.total_duration),
        ),
        row("Density", format!("{} / day", app.insights.activity_density)),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(panel(" Week ")),
        chunks[0],
    );

    let mut day_lines = Vec::new();
    if let Some(view) = app.selected() {
        if view.is_empty() {
            day_lines.push(Line::from(Span::styled("No meetings", Style::default().fg(THEME.muted))));
        }
        for item in &view.segments {
            let start = item.start_time().map(|t| t.to_string()).unwrap_or_else(|| "--:--".to_string());
            day_lines.push(Line::from(vec![
                Span::styled(format!("{start} "), Style::default().fg(THEME.primary)),
                Span::raw(format!("{} ({}m)", item.title(), item.duration())),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(day_lines).block(panel(&format!(" {} ", app.selected_day))),
        chunks[1],
    );

    let ratio = f64::from(app.insights.coverage_percent) / 100.0;
    let gauge = Gauge::default()
        .block(panel(" Coverage "))
        .gauge_style(Style::default().fg(if ratio < 0.8 { THEME.warn } else { THEME.selected }))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}% of weekdays", app.insights.coverage_percent));
    frame.render_widget(gauge, chunks[2]);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmds_core::model::sample_segments;
    use fmds_core::{build_analytics, Segment};

    fn dashboard() -> Dashboard {
        let segments: Vec<Segment> = sample_segments().into_iter().map(Segment::new).collect();
        let analytics = build_analytics(&segments);
        let insights = ScheduleInsights::new(&segments, &analytics, 40);
        Dashboard::new(analytics, insights, "07:10 - 07:50".to_string())
    }

    #[test]
    fn test_starts_on_busiest_day() {
        let app = dashboard();
        assert_eq!(app.selected_day, Weekday::Wednesday);
        assert_eq!(app.selected().unwrap().total_duration, 40);
    }

    #[test]
    fn test_day_navigation_wraps() {
        let mut app = dashboard();
        app.next_day();
        assert_eq!(app.selected_day, Weekday::Thursday);
        app.next_day();
        assert_eq!(app.selected_day, Weekday::Sunday);
        app.previous_day();
        assert_eq!(app.selected_day, Weekday::Thursday);
    }
}
