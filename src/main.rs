use anyhow::Result;
use log::{info, warn};
use pulsar::anim::Millis;
use pulsar::app::{App, UiEvent, BUTTON_LEFT};
use pulsar::config::Config;
use pulsar::timing::{frame_delay, Clock, SystemClock, Timer};
use std::collections::VecDeque;

/// Input for the headless session, as (time in ms, event).
fn demo_script() -> VecDeque<(Millis, UiEvent)> {
    VecDeque::from(vec![
        (100.0, UiEvent::PointerMove { pos: [600.0, 400.0] }),
        (200.0, UiEvent::PointerDown { button: BUTTON_LEFT }),
        (600.0, UiEvent::PointerUp { button: BUTTON_LEFT }),
        (1000.0, UiEvent::PointerDown { button: BUTTON_LEFT }),
        // Let go halfway through growing.
        (1100.0, UiEvent::PointerUp { button: BUTTON_LEFT }),
        (1400.0, UiEvent::TogglePause),
        (1700.0, UiEvent::Translate { dx: 0.1, dy: 0.0, dz: -0.2 }),
        (1900.0, UiEvent::TogglePause),
        (2200.0, UiEvent::PointerDown { button: BUTTON_LEFT }),
        (2500.0, UiEvent::Reset),
    ])
}

/// Pop every scripted event due by `now`, ending with `Quit` once the session
/// is over.
fn due_events(
    script: &mut VecDeque<(Millis, UiEvent)>,
    now: Millis,
    session_ms: Millis,
) -> Vec<UiEvent> {
    let mut due = Vec::new();
    while script.front().is_some_and(|(at, _)| *at <= now.min(session_ms)) {
        if let Some((_, event)) = script.pop_front() {
            due.push(event);
        }
    }
    if now >= session_ms {
        script.clear();
        due.push(UiEvent::Quit);
    }
    due
}

fn main() -> Result<()> {
    env_logger::init();
    println!("Starting pulsar...");

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            warn!("Failed to load config, using defaults: {err:#}");
            Config::default()
        }
    };
    config.validate()?;
    info!(
        "Cursor: {:?} over {}ms, radius {} -> {}, mode {:?}",
        config.cursor.easing,
        config.cursor.duration_ms,
        config.cursor.min_radius,
        config.cursor.max_radius,
        config.cursor.mode
    );

    let fps_cap = config.fps_cap;
    let session_ms = config.session_ms;
    let mut script = demo_script();
    let mut app = App::new(config);

    let clock = SystemClock::new();
    let mut timer = Timer::new(&clock);
    let mut frames = 0u64;
    let mut last_radius = app.uniforms().cursor_radius;

    println!("Starting main loop...");
    while app.running {
        let now = clock.now_ms();

        for event in due_events(&mut script, now, session_ms) {
            app.handle_event(event, now);
        }

        let dt = timer.delta_time(&clock);
        app.update(now, dt);
        frames += 1;

        let radius = app.uniforms().cursor_radius;
        if radius != last_radius {
            println!("{now:8.1}ms  radius {radius:7.3}");
            last_radius = radius;
        }

        let frame_time = clock.now_ms() - now;
        if let Some(delay) = frame_delay(frame_time, fps_cap) {
            std::thread::sleep(delay);
        }
    }

    println!(
        "[END]: {} frames, {} cursor runs finished",
        frames,
        app.finished_runs()
    );
    Ok(())
}
