use ratatui::widgets::TableState;
use std::time::{Duration, Instant};

use fmds_core::{build_day_view, CountdownTimer, DaySchedule, Segment, TimerEvent, Weekday};

pub struct App {
    pub segments: Vec<Segment>,
    pub view: DaySchedule,
    pub state: TableState,
    pub timer: CountdownTimer,
    pub window_label: String,
    pub message: Option<String>,
    last_tick: Instant,
}

impl App {
    pub fn new(segments: Vec<Segment>, day: Weekday, window_label: String) -> App {
        let view = build_day_view(&segments, day);
        let mut state = TableState::default();
        if !view.is_empty() {
            state.select(Some(0));
        }
        App {
            segments,
            view,
            state,
            timer: CountdownTimer::new(),
            window_label,
            message: None,
            last_tick: Instant::now(),
        }
    }

    pub fn day(&self) -> Weekday {
        self.view.day
    }

    /// Switching days abandons any running countdown.
    pub fn set_day(&mut self, day: Weekday) {
        self.timer.stop();
        self.message = None;
        self.view = build_day_view(&self.segments, day);
        self.state.select(if self.view.is_empty() { None } else { Some(0) });
    }

    pub fn next_day(&mut self) {
        self.set_day(self.day().next());
    }

    pub fn previous_day(&mut self) {
        self.set_day(self.day().previous());
    }

    pub fn next(&mut self) {
        let len = self.view.segments.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.segments.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn start_selected(&mut self) {
        let Some(i) = self.state.selected() else { return };
        let Some(item) = self.view.segments.get(i) else { return };
        self.timer.start(i, item.duration());
        self.message = Some(format!("Started {}", item.title()));
        self.last_tick = Instant::now();
    }

    pub fn toggle_pause(&mut self) {
        self.timer.toggle();
        self.last_tick = Instant::now();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
        self.message = None;
    }

    /// Title of the segment the countdown belongs to.
    pub fn active_title(&self) -> Option<&str> {
        if !self.timer.is_active() && self.timer.total_secs == 0 {
            return None;
        }
        self.view.segments.get(self.timer.segment_index).map(|s| s.title())
    }

    /// Advances the countdown by whole seconds elapsed since the last
    /// call. Returns true when a segment just finished.
    pub fn on_tick(&mut self) -> bool {
        let elapsed = self.last_tick.elapsed().as_secs();
        if elapsed == 0 {
            return false;
        }
        self.last_tick += Duration::from_secs(elapsed);
        (0..elapsed).any(|_| self.tick_once())
    }

    pub(crate) fn tick_once(&mut self) -> bool {
        if self.timer.tick() != TimerEvent::Finished {
            return false;
        }
        let finished = self.view.segments.get(self.timer.segment_index).map(|s| s.title().to_string());
        self.message = finished.map(|t| format!("{t} finished"));
        // queue up the next segment
        let next = self.timer.segment_index + 1;
        if next < self.view.segments.len() {
            self.state.select(Some(next));
        }
        true
    }
}
