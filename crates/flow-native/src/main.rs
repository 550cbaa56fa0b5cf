//! Desktop viewer. A keyboard-driven hand tracker stands in for the camera:
//!
//!   0-5       show that many fingers (5 includes the thumb)
//!   O F P     open hand, fist, thumb-index pinch
//!   Tab       switch the primary hand between right and left
//!   Space     raise or drop a second, open hand
//!   Left/Right  move the two hands closer or further apart
//!   Escape    take all hands out of view
//!   E         report one failed tracker frame
//!   F1-F5     heart, flower, saturn, buddha, fireworks
//!   T         pixel text from FLOW_TEXT (default "RUST!")
//!   G         next color gradient
//!
//! FLOW_PARTICLES and FLOW_SEED override the particle count and RNG seed.

mod gpu;
mod synthetic;

use flow_core::{
    DetectorStatus, FlowError, Gradient, SessionConfig, SessionController, Shape,
};
use gpu::GpuState;
use synthetic::{Gesture, SyntheticDetector, TrackerEvent};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a valid value");
            None
        }
    }
}

/// A particle count for FLOW_PARTICLES; it must fit the GPU's `u32`
/// instance range.
fn parse_particle_count(raw: &str) -> Option<usize> {
    let count = raw.trim().parse::<u32>().ok()?;
    usize::try_from(count).ok()
}

fn session_config() -> SessionConfig {
    let mut config = SessionConfig::default();
    if let Ok(raw) = std::env::var("FLOW_PARTICLES") {
        match parse_particle_count(&raw) {
            Some(count) => config.particle_count = count,
            None => log::warn!(
                "ignoring FLOW_PARTICLES={raw:?}: expected a count up to {}",
                u32::MAX
            ),
        }
    }
    config.seed = env_parse::<u64>("FLOW_SEED");
    config
}

fn window_title(session: &SessionController) -> String {
    let status = match session.detector_status() {
        DetectorStatus::Initializing => "loading hand tracker...".to_string(),
        DetectorStatus::Ready => "tracking".to_string(),
        DetectorStatus::Failed(msg) => format!("tracker unavailable: {msg}"),
    };
    let control = session.control();
    format!(
        "Particle Flow | {} | {} | {}",
        control.active_shape,
        session.state().gradient.name,
        status
    )
}

/// Keys that change the pretend camera's view.
fn apply_hand_key(detector: &SyntheticDetector, key: &Key) -> bool {
    let mut handled = true;
    detector.with_rig(|rig| match key {
        Key::Character(c) => match c.as_str() {
            d @ ("0" | "1" | "2" | "3" | "4" | "5") => {
                let n = d.parse::<u8>().unwrap_or(0);
                rig.primary = Some(Gesture::Count(n));
            }
            "o" | "O" => rig.primary = Some(Gesture::Open),
            "f" | "F" => rig.primary = Some(Gesture::Fist),
            "p" | "P" => rig.primary = Some(Gesture::Pinch),
            "e" | "E" => rig.fail_next = true,
            _ => handled = false,
        },
        Key::Named(NamedKey::Tab) => rig.flip_side(),
        Key::Named(NamedKey::Space) => {
            rig.second_hand = !rig.second_hand;
            if rig.primary.is_none() {
                rig.primary = Some(Gesture::Open);
            }
        }
        Key::Named(NamedKey::ArrowRight) => rig.widen(1.0),
        Key::Named(NamedKey::ArrowLeft) => rig.widen(-1.0),
        Key::Named(NamedKey::Escape) => {
            rig.primary = None;
            rig.second_hand = false;
        }
        _ => handled = false,
    });
    handled
}

/// UI picks: shape and gradient.
fn apply_ui_key(session: &mut SessionController, key: &Key, palettes: &[Gradient]) {
    let shape = match key {
        Key::Named(NamedKey::F1) => Some(Shape::Heart),
        Key::Named(NamedKey::F2) => Some(Shape::Flower),
        Key::Named(NamedKey::F3) => Some(Shape::Saturn),
        Key::Named(NamedKey::F4) => Some(Shape::Buddha),
        Key::Named(NamedKey::F5) => Some(Shape::Fireworks),
        Key::Character(c) if c.eq_ignore_ascii_case("t") => {
            let text = std::env::var("FLOW_TEXT").unwrap_or_else(|_| "RUST!".to_string());
            Some(Shape::Text(text))
        }
        _ => None,
    };
    if let Some(shape) = shape {
        session.set_shape(shape);
        return;
    }
    if let Key::Character(c) = key {
        if c.eq_ignore_ascii_case("g") && !palettes.is_empty() {
            let current = &session.state().gradient.id;
            let next = palettes
                .iter()
                .position(|g| &g.id == current)
                .map_or(0, |i| (i + 1) % palettes.len());
            session.set_gradient(palettes[next].clone());
        }
    }
}

fn drain_tracker(session: &mut SessionController, detector: &SyntheticDetector) {
    while let Some(event) = detector.poll() {
        match event {
            TrackerEvent::Frame(frame) => session.on_detector_frame(&frame),
            TrackerEvent::Error(msg) => session.on_detector_error(&FlowError::Detector(msg)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut session = SessionController::new(session_config())?;
    let palettes = Gradient::palettes();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(&session))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window, session.particle_count()))?;
    let mut detector = match SyntheticDetector::spawn() {
        Ok(d) => Some(d),
        Err(e) => {
            session.detector_failed(&FlowError::DetectorUnavailable(e.to_string()));
            None
        }
    };
    let mut title = window_title(&session);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => gpu.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            match detector.as_mut() {
                Some(d) => session.shutdown(d, &mut gpu),
                None => session.shutdown(&mut NoDetector, &mut gpu),
            }
            elwt.exit();
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => {
            let handled = detector
                .as_ref()
                .is_some_and(|d| apply_hand_key(d, &logical_key));
            if !handled {
                apply_ui_key(&mut session, &logical_key, &palettes);
            }
        }
        Event::AboutToWait => {
            if let Some(d) = detector.as_ref() {
                drain_tracker(&mut session, d);
            }
            let Some(frame) = session.frame() else {
                return;
            };
            match gpu.render(&frame) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::debug!("[gpu] skipped frame: {e}"),
            }
            let next = window_title(&session);
            if next != title {
                gpu.window.set_title(&next);
                title = next;
            }
        }
        _ => {}
    })?;
    Ok(())
}

/// Teardown target when the tracker never started.
struct NoDetector;

impl flow_core::DetectorControl for NoDetector {
    fn stop(&mut self) {}
}
