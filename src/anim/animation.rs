use super::easing::Easing;
use log::debug;
use std::fmt;
use std::rc::Rc;

/// Milliseconds since an arbitrary epoch, as handed out by a [`Clock`].
///
/// [`Clock`]: crate::timing::Clock
pub type Millis = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reversed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Completed,
}

/// A single value eased from `from` to `to` over `duration` milliseconds.
///
/// Meant to be long-lived: build it once per animated property and call
/// [`start`](Self::start) whenever the triggering event happens.
pub struct Animation {
    duration: Millis,
    start_time: Option<Millis>,
    from: f32,
    to: f32,
    direction: Direction,
    running: bool,
    complete: bool,
    bounce: bool,
    bounced: bool,
    retrace: bool,
    on_finish: Option<Box<dyn FnMut()>>,
    curve: Rc<dyn Easing>,
}

impl Animation {
    /// Panics if `duration` is not a positive, finite number of milliseconds.
    pub fn new(duration: Millis, from: f32, to: f32, curve: impl Easing + 'static) -> Self {
        Self::with_curve(duration, from, to, Rc::new(curve))
    }

    /// Like [`new`](Self::new), for a curve shared with other animations.
    pub fn with_curve(duration: Millis, from: f32, to: f32, curve: Rc<dyn Easing>) -> Self {
        assert!(
            duration.is_finite() && duration > 0.0,
            "animation duration must be positive, got {duration}"
        );
        Self {
            duration,
            start_time: None,
            from,
            to,
            direction: Direction::Forward,
            running: false,
            complete: false,
            bounce: false,
            bounced: false,
            retrace: false,
            on_finish: None,
            curve,
        }
    }

    /// Replace the completion callback.
    pub fn with_on_finish(mut self, on_finish: impl FnMut() + 'static) -> Self {
        self.set_on_finish(on_finish);
        self
    }

    pub fn set_on_finish(&mut self, on_finish: impl FnMut() + 'static) {
        self.on_finish = Some(Box::new(on_finish));
    }

    pub fn clear_on_finish(&mut self) {
        self.on_finish = None;
    }

    /// Reverse once, in place, the first time a forward run passes its
    /// midpoint. The run then ends back where it started.
    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn start(&mut self, now: Millis) {
        self.running = true;
        self.complete = false;
        self.bounced = false;
        self.retrace = false;
        self.start_time = Some(now);
    }

    /// Current value. Once the run has completed this keeps returning `to`
    /// without touching the clock or the callback.
    pub fn ease(&mut self, now: Millis) -> f32 {
        if self.complete {
            return self.to;
        }

        let t = self.progress(now) as f32;
        if self.retrace {
            // Walk the interrupted run's curve backwards so the reversal
            // never jumps, whatever the curve's shape.
            self.curve.ease(self.to, self.from, 1.0 - t)
        } else {
            self.curve.ease(self.from, self.to, t)
        }
    }

    /// Swap `from` and `to` without a visible jump.
    ///
    /// A completed run restarts at `now` from the new `from`. A run in flight
    /// gets a new start time so that the fraction `p` it had at `now` becomes
    /// `1 - p`.
    pub fn reverse(&mut self, now: Millis) {
        self.flip();

        if self.complete {
            self.complete = false;
            self.running = true;
            self.retrace = false;
            self.start_time = Some(now);
        } else if let Some(start) = self.start_time {
            let p = self.fraction(start, now);
            self.retrace = !self.retrace;
            self.start_time = Some(now - (1.0 - p) * self.duration);
        }
    }

    /// Stop and forget the current run, restoring the constructed
    /// orientation.
    pub fn reset(&mut self) {
        if self.direction == Direction::Reversed {
            self.flip();
        }
        self.running = false;
        self.complete = false;
        self.bounced = false;
        self.retrace = false;
        self.start_time = None;
    }

    /// Whether `now` lies past the end of the current run. Never mutates.
    pub fn finished(&self, now: Millis) -> bool {
        match self.start_time {
            Some(start) => now > start + self.duration,
            None => false,
        }
    }

    pub fn state(&self) -> AnimationState {
        if self.complete {
            AnimationState::Completed
        } else if self.running {
            AnimationState::Running
        } else {
            AnimationState::Idle
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn start_time(&self) -> Option<Millis> {
        self.start_time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_reversed(&self) -> bool {
        self.direction == Direction::Reversed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn flip(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.direction = match self.direction {
            Direction::Forward => Direction::Reversed,
            Direction::Reversed => Direction::Forward,
        };
    }

    fn fraction(&self, start: Millis, now: Millis) -> f64 {
        ((now - start) / self.duration).clamp(0.0, 1.0)
    }

    /// Advance the run, ending it once the fraction reaches 1.
    fn progress(&mut self, now: Millis) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        if self.complete {
            return 1.0;
        }

        let mut raw = (now - start) / self.duration;

        if self.bounce && !self.bounced && self.direction == Direction::Forward && raw >= 0.5 {
            self.bounced = true;
            if raw >= 1.0 {
                // First look came after the whole pulse: land on the start.
                self.flip();
                self.retrace = true;
            } else {
                debug!("animation bounced at fraction {raw:.3}");
                self.reverse(now);
                if let Some(start) = self.start_time {
                    raw = (now - start) / self.duration;
                }
            }
        }

        if raw >= 1.0 {
            self.running = false;
            self.complete = true;
            debug!("animation complete after {:.1}ms", now - start);
            if let Some(on_finish) = self.on_finish.as_mut() {
                on_finish();
            }
            return 1.0;
        }

        raw.max(0.0)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.duration)
            .field("start_time", &self.start_time)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("direction", &self.direction)
            .field("running", &self.running)
            .field("complete", &self.complete)
            .field("bounce", &self.bounce)
            .field("retrace", &self.retrace)
            .field("has_on_finish", &self.on_finish.is_some())
            .finish()
    }
}
