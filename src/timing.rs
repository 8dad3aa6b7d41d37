use crate::anim::Millis;
use std::cell::Cell;
use std::time::{Duration, Instant};

/// A monotonic source of timestamps in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall clock, counting from when it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

/// Frame timer: reports how much time passed since the previous tick.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    last_time: Millis,
}

impl Timer {
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            last_time: clock.now_ms(),
        }
    }

    pub fn last_time(&self) -> Millis {
        self.last_time
    }

    pub fn delta_time(&mut self, clock: &impl Clock) -> Millis {
        let now = clock.now_ms();
        let dt = now - self.last_time;
        self.last_time = now;
        dt
    }
}

/// How long to sleep after a frame that took `dt` ms to stay under `fps_cap`.
pub fn frame_delay(dt: Millis, fps_cap: u32) -> Option<Duration> {
    if fps_cap == 0 {
        return None;
    }
    let budget = 1000.0 / fps_cap as f64;
    if dt < budget {
        Some(Duration::from_secs_f64((budget - dt) / 1000.0))
    } else {
        None
    }
}
