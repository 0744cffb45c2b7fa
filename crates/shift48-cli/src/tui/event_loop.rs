use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// Events produced by the TUI event loop.
#[derive(Debug)]
pub(super) enum TuiEvent {
    /// A tick is due; carries the wall-clock time since the previous tick.
    Tick(Duration),
    /// The screen should be redrawn.
    Render,
    /// A terminal event arrived.
    Input(Event),
}

/// Event loop state management.
///
/// Ticks fire at the configured interval and carry the measured elapsed
/// time, so a slow frame still advances game time by what really passed.
/// Renders are produced after every state change (tick or input).
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            last_tick: Instant::now(),
            // Initial render is required on startup
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Returns the next event, blocking until a tick is due or a terminal
    /// event occurs.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let since_tick = now.duration_since(self.last_tick);
            if since_tick >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick(since_tick));
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.tick_interval - since_tick;
            if !event::poll(timeout)? {
                continue;
            }
            self.dirty = true;
            return Ok(TuiEvent::Input(event::read()?));
        }
    }
}
