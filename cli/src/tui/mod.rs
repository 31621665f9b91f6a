pub mod app;
pub mod ui;

use std::io::{self, Write};
use std::time::Duration;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use fmds_core::{Config, SegmentRepository, SegmentService, Weekday};

use crate::tui::app::App;

pub fn run<R: SegmentRepository>(service: &SegmentService<R>, config: &Config, day: Weekday) -> Result<()> {
    let segments = service.list_segments()?;
    let mut app = App::new(segments, day, config.meeting.window_label());
    debug!(%day, segments = app.view.activity_count, "opening timer view");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                        KeyCode::Enter => app.start_selected(),
                        KeyCode::Char(' ') => app.toggle_pause(),
                        KeyCode::Char('s') => app.stop(),
                        _ => {}
                    }
                }
            }
        }

        if app.on_tick() {
            // terminal bell
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07")?;
            backend.flush()?;
        }
    }
}
