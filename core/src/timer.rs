use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// What a call to [`CountdownTimer::tick`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Nothing to count: idle, paused or already finished.
    Ignored,
    Tick { remaining_secs: u32 },
    /// Reached zero on this tick. Reported once.
    Finished,
}

/// Countdown for one segment of the day's agenda, advanced one second
/// per `tick`. The caller owns the clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountdownTimer {
    pub status: TimerStatus,
    pub segment_index: usize,
    pub total_secs: u32,
    pub remaining_secs: u32,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, segment_index: usize, duration_minutes: u32) {
        let total_secs = duration_minutes.saturating_mul(60);
        *self = Self {
            status: if total_secs == 0 { TimerStatus::Finished } else { TimerStatus::Running },
            segment_index,
            total_secs,
            remaining_secs: total_secs,
        };
    }

    pub fn pause(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == TimerStatus::Paused {
            self.status = TimerStatus::Running;
        }
    }

    pub fn toggle(&mut self) {
        match self.status {
            TimerStatus::Running => self.pause(),
            TimerStatus::Paused => self.resume(),
            TimerStatus::Idle | TimerStatus::Finished => {}
        }
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self) -> TimerEvent {
        if self.status != TimerStatus::Running {
            return TimerEvent::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Finished;
            TimerEvent::Finished
        } else {
            TimerEvent::Tick {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, TimerStatus::Running | TimerStatus::Paused)
    }

    /// Elapsed share in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        f64::from(self.total_secs - self.remaining_secs) / f64::from(self.total_secs)
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// "MM:SS"; minutes are not capped at 59.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
