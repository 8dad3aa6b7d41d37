use crate::anim::{Animation, AnimationState, Millis};
use crate::config::{Config, CursorMode};
use log::{debug, info, trace};
use std::cell::Cell;
use std::rc::Rc;

/// Linux input code for the left mouse button.
pub const BUTTON_LEFT: u32 = 0x110;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerMove { pos: [f32; 2] },
    PointerDown { button: u32 },
    PointerUp { button: u32 },
    Resize { width: u32, height: u32 },
    Translate { dx: f32, dy: f32, dz: f32 },
    TogglePause,
    Reset,
    Quit,
}

/// Everything the fragment shader reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uniforms {
    pub window: [f32; 2],
    /// Pixels, origin at the bottom left.
    pub mouse: [f32; 2],
    pub time: f32,
    pub translation: [f32; 3],
    pub cursor_radius: f32,
}

pub struct App {
    pub config: Config,
    pub running: bool,
    pub paused: bool,
    pub time: Millis,
    pub held: bool,
    cursor: Animation,
    uniforms: Uniforms,
    finished_runs: Rc<Cell<u32>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let finished_runs = Rc::new(Cell::new(0));
        let counter = finished_runs.clone();
        let cursor = config.cursor.build_animation().with_on_finish(move || {
            counter.set(counter.get() + 1);
            debug!("cursor animation finished ({} runs)", counter.get());
        });

        let uniforms = Uniforms {
            window: [config.window.width as f32, config.window.height as f32],
            cursor_radius: cursor.from(),
            ..Uniforms::default()
        };

        Self {
            config,
            running: true,
            paused: false,
            time: 0.0,
            held: false,
            cursor,
            uniforms,
            finished_runs,
        }
    }

    pub fn handle_event(&mut self, event: UiEvent, now: Millis) {
        match event {
            UiEvent::PointerMove { pos } => {
                self.uniforms.mouse = [pos[0], self.uniforms.window[1] - pos[1]];
            }
            UiEvent::PointerDown { button } if button == BUTTON_LEFT => {
                info!("Left click at {:.1}ms", now);
                self.held = true;
                self.press(now);
            }
            UiEvent::PointerUp { button } if button == BUTTON_LEFT => {
                self.held = false;
                self.release(now);
            }
            UiEvent::PointerDown { .. } | UiEvent::PointerUp { .. } => {}
            UiEvent::Resize { width, height } => {
                self.uniforms.window = [width as f32, height as f32];
                info!("Resized to {}x{}", width, height);
            }
            UiEvent::Translate { dx, dy, dz } => {
                let t = &mut self.uniforms.translation;
                t[0] += dx;
                t[1] += dy;
                // The shader adds 1 to z; anything below -1 would invert the zoom.
                t[2] = (t[2] + dz).max(-1.0);
            }
            UiEvent::TogglePause => {
                self.paused = !self.paused;
                info!("{} time", if self.paused { "Paused" } else { "Unpaused" });
            }
            UiEvent::Reset => {
                self.time = 0.0;
                self.uniforms.time = 0.0;
                self.uniforms.translation = [0.0; 3];
                self.cursor.reset();
                self.uniforms.cursor_radius = self.cursor.from();
                info!("Reset position, time and cursor");
            }
            UiEvent::Quit => {
                info!("Quitting...");
                self.running = false;
            }
        }
    }

    fn press(&mut self, now: Millis) {
        match self.config.cursor.mode {
            CursorMode::Pulse => {
                self.cursor.reset();
                self.cursor.start(now);
            }
            CursorMode::Hold => {
                if self.cursor.is_reversed() {
                    self.cursor.reverse(now);
                } else if self.cursor.state() == AnimationState::Idle {
                    self.cursor.start(now);
                }
            }
        }
    }

    fn release(&mut self, now: Millis) {
        if self.config.cursor.mode == CursorMode::Hold
            && !self.cursor.is_reversed()
            && self.cursor.state() != AnimationState::Idle
        {
            self.cursor.reverse(now);
        }
    }

    /// Advance one frame. `dt` feeds the time uniform, `now` the animations.
    pub fn update(&mut self, now: Millis, dt: Millis) {
        if !self.paused {
            self.time += dt;
        }
        self.uniforms.time = self.time as f32;
        self.uniforms.cursor_radius = self.cursor.ease(now);
        trace!(
            "frame {:.1}ms: radius={:.3} time={:.1}",
            now,
            self.uniforms.cursor_radius,
            self.uniforms.time
        );
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn cursor(&self) -> &Animation {
        &self.cursor
    }

    /// How many cursor runs have reached their end.
    pub fn finished_runs(&self) -> u32 {
        self.finished_runs.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::EasingKind;
    use assert_approx_eq::assert_approx_eq;

    fn linear_app(mode: CursorMode) -> App {
        let mut config = Config::default();
        config.cursor.duration_ms = 100.0;
        config.cursor.min_radius = 10.0;
        config.cursor.max_radius = 20.0;
        config.cursor.easing = EasingKind::Linear;
        config.cursor.mode = mode;
        App::new(config)
    }

    #[test]
    fn idle_cursor_sits_at_min_radius() {
        let mut app = linear_app(CursorMode::Hold);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
        app.update(500.0, 16.0);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
        assert_eq!(app.finished_runs(), 0);
    }

    #[test]
    fn hold_grows_then_release_shrinks() {
        let mut app = linear_app(CursorMode::Hold);
        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 0.0);
        app.update(50.0, 50.0);
        assert_approx_eq!(app.uniforms().cursor_radius, 15.0, 1e-4);

        app.update(150.0, 100.0);
        assert_eq!(app.uniforms().cursor_radius, 20.0);
        assert_eq!(app.finished_runs(), 1);

        // Held past the end: stays large.
        app.update(300.0, 150.0);
        assert_eq!(app.uniforms().cursor_radius, 20.0);

        app.handle_event(UiEvent::PointerUp { button: BUTTON_LEFT }, 300.0);
        app.update(300.0, 0.0);
        assert_eq!(app.uniforms().cursor_radius, 20.0);
        app.update(350.0, 50.0);
        assert_approx_eq!(app.uniforms().cursor_radius, 15.0, 1e-4);
        app.update(400.0, 50.0);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
        assert_eq!(app.finished_runs(), 2);
    }

    #[test]
    fn release_after_full_grow_runs_curve_forward() {
        let mut config = linear_app(CursorMode::Hold).config;
        config.cursor.easing = EasingKind::Sine;
        let mut app = App::new(config);

        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 0.0);
        app.update(150.0, 150.0);
        assert_eq!(app.uniforms().cursor_radius, 20.0);

        app.handle_event(UiEvent::PointerUp { button: BUTTON_LEFT }, 300.0);
        app.update(350.0, 200.0);
        assert_approx_eq!(
            app.uniforms().cursor_radius,
            crate::anim::easing::sine(20.0, 10.0, 0.5),
            1e-5
        );
        app.update(400.0, 50.0);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
    }

    #[test]
    fn early_release_reverses_without_jump() {
        let mut app = linear_app(CursorMode::Hold);
        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 0.0);
        app.update(30.0, 30.0);
        let before = app.uniforms().cursor_radius;

        app.handle_event(UiEvent::PointerUp { button: BUTTON_LEFT }, 30.0);
        app.update(30.0, 0.0);
        assert_approx_eq!(app.uniforms().cursor_radius, before, 1e-4);
        assert!(app.cursor().is_reversed());

        // Pressing again mid-shrink grows back from where it is.
        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 40.0);
        app.update(40.0, 10.0);
        assert_approx_eq!(app.uniforms().cursor_radius, 12.0, 1e-4);
        assert!(!app.cursor().is_reversed());
    }

    #[test]
    fn pulse_bounces_back() {
        let mut app = linear_app(CursorMode::Pulse);
        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 0.0);
        app.handle_event(UiEvent::PointerUp { button: BUTTON_LEFT }, 10.0);
        app.update(50.0, 50.0);
        assert_approx_eq!(app.uniforms().cursor_radius, 15.0, 1e-4);
        app.update(75.0, 25.0);
        assert_approx_eq!(app.uniforms().cursor_radius, 12.5, 1e-4);
        app.update(100.0, 25.0);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
        assert_eq!(app.finished_runs(), 1);

        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 200.0);
        app.update(240.0, 140.0);
        assert_approx_eq!(app.uniforms().cursor_radius, 14.0, 1e-4);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut app = linear_app(CursorMode::Hold);
        app.handle_event(UiEvent::PointerDown { button: 0x111 }, 0.0);
        app.update(50.0, 50.0);
        assert_eq!(app.cursor().state(), AnimationState::Idle);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
    }

    #[test]
    fn pause_freezes_time() {
        let mut app = linear_app(CursorMode::Hold);
        app.update(16.0, 16.0);
        app.handle_event(UiEvent::TogglePause, 16.0);
        app.update(32.0, 16.0);
        assert_eq!(app.uniforms().time, 16.0);
        app.handle_event(UiEvent::TogglePause, 32.0);
        app.update(48.0, 16.0);
        assert_eq!(app.uniforms().time, 32.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut app = linear_app(CursorMode::Hold);
        app.handle_event(UiEvent::Translate { dx: 0.5, dy: -0.25, dz: 0.0 }, 0.0);
        app.handle_event(UiEvent::PointerDown { button: BUTTON_LEFT }, 0.0);
        app.update(60.0, 60.0);
        app.handle_event(UiEvent::PointerUp { button: BUTTON_LEFT }, 60.0);

        app.handle_event(UiEvent::Reset, 70.0);
        assert_eq!(app.uniforms().translation, [0.0; 3]);
        assert_eq!(app.uniforms().time, 0.0);
        assert_eq!(app.cursor().state(), AnimationState::Idle);
        assert!(!app.cursor().is_reversed());
        app.update(80.0, 10.0);
        assert_eq!(app.uniforms().cursor_radius, 10.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut app = linear_app(CursorMode::Hold);
        app.handle_event(UiEvent::Translate { dx: 0.0, dy: 0.0, dz: -0.75 }, 0.0);
        app.handle_event(UiEvent::Translate { dx: 0.0, dy: 0.0, dz: -0.75 }, 0.0);
        assert_eq!(app.uniforms().translation[2], -1.0);
    }

    #[test]
    fn mouse_is_flipped_to_bottom_left() {
        let mut app = linear_app(CursorMode::Hold);
        app.handle_event(UiEvent::Resize { width: 800, height: 600 }, 0.0);
        app.handle_event(UiEvent::PointerMove { pos: [100.0, 150.0] }, 0.0);
        assert_eq!(app.uniforms().window, [800.0, 600.0]);
        assert_eq!(app.uniforms().mouse, [100.0, 450.0]);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = linear_app(CursorMode::Hold);
        assert!(app.running);
        app.handle_event(UiEvent::Quit, 0.0);
        assert!(!app.running);
    }
}
