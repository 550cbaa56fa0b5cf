//! Session controller: owns every buffer and the control state, and wires
//! detector callbacks, frame steps and UI requests to them.
//!
//! Detector callbacks and frame steps both take `&mut self`, so a callback
//! (including any target swap) always completes before the next frame reads
//! the state. A host with real parallelism must serialize the two the same
//! way, e.g. by funnelling both through one owner.

use crate::constants::DEFAULT_PARTICLE_COUNT;
use crate::error::{FlowError, Result};
use crate::gesture::{ControlSignal, GestureInterpreter, InterpreterConfig};
use crate::gradient::Gradient;
use crate::landmarks::DetectorFrame;
use crate::shapes::{sample_with, Shape};
use crate::simulation::{ParticleBuffers, Simulation, TargetBuffer};
use glam::Vec3;
use instant::Instant;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub particle_count: usize,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub base_shape: Shape,
    pub gradient: Gradient,
    pub interpreter: InterpreterConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            base_shape: Shape::default(),
            gradient: Gradient::default(),
            interpreter: InterpreterConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DetectorStatus {
    #[default]
    Initializing,
    Ready,
    /// Camera or model could not be acquired; gestures stay at idle defaults.
    Failed(String),
}

/// Hand detector side of a session, stopped on teardown.
pub trait DetectorControl {
    fn stop(&mut self);
}

/// Renderer side of a session, released on teardown.
pub trait RendererControl {
    fn release(&mut self);
}

/// Everything that lives for one session.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub buffers: ParticleBuffers,
    pub target: TargetBuffer,
    pub control: ControlSignal,
    pub simulation: Simulation,
    pub gradient: Gradient,
    pub detector: DetectorStatus,
    alive: bool,
}

/// Borrowed view of one frame for a renderer. Valid until the next mutation.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    pub positions: &'a [Vec3],
    pub colors: &'a [Vec3],
    pub rotation_y: f32,
}

impl<'a> FrameSnapshot<'a> {
    /// `N * 3` packed floats.
    pub fn positions_flat(&self) -> &'a [f32] {
        bytemuck::cast_slice(self.positions)
    }

    /// `N * 3` packed floats.
    pub fn colors_flat(&self) -> &'a [f32] {
        bytemuck::cast_slice(self.colors)
    }
}

pub struct SessionController {
    state: SessionState,
    interpreter: GestureInterpreter,
    rng: StdRng,
    clock: Instant,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Result<Self> {
        if config.particle_count == 0 {
            return Err(FlowError::EmptyParticleCount);
        }
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let buffers = ParticleBuffers::scattered(config.particle_count, &config.gradient, &mut rng);
        let target = TargetBuffer::new(sample_with(
            &config.base_shape,
            config.particle_count,
            &mut rng,
        ));
        log::info!(
            "[session] start particles={} shape={} gradient={}",
            config.particle_count,
            config.base_shape,
            config.gradient.id
        );
        Ok(Self {
            state: SessionState {
                buffers,
                target,
                control: ControlSignal::new(config.base_shape),
                simulation: Simulation::new(),
                gradient: config.gradient,
                detector: DetectorStatus::Initializing,
                alive: true,
            },
            interpreter: GestureInterpreter::new(config.interpreter),
            rng,
            clock: Instant::now(),
        })
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    pub fn control(&self) -> &ControlSignal {
        &self.state.control
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.state.buffers.len()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state.alive
    }

    #[inline]
    pub fn detector_status(&self) -> &DetectorStatus {
        &self.state.detector
    }

    /// True while the detector has neither delivered a frame nor failed.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.state.detector == DetectorStatus::Initializing
    }

    pub fn detector_ready(&mut self) {
        if self.state.detector != DetectorStatus::Ready {
            log::info!("[session] hand detector ready");
            self.state.detector = DetectorStatus::Ready;
        }
    }

    /// Detector could not start. The session keeps animating on defaults.
    pub fn detector_failed(&mut self, err: &FlowError) {
        log::error!("[session] {err}");
        self.state.detector = DetectorStatus::Failed(err.to_string());
    }

    /// Detector callback. No-op after shutdown.
    pub fn on_detector_frame(&mut self, frame: &DetectorFrame) {
        if !self.state.alive {
            return;
        }
        if self.state.detector == DetectorStatus::Initializing {
            self.detector_ready();
        }
        self.interpreter.update(
            &mut self.state.control,
            frame,
            &mut self.state.target,
            &mut self.rng,
        );
    }

    /// A single detector frame failed; handled as a frame with no hands.
    pub fn on_detector_error(&mut self, err: &FlowError) {
        if !self.state.alive {
            return;
        }
        log::warn!("[session] detector frame dropped: {err}");
        self.on_detector_frame(&DetectorFrame::empty());
    }

    /// Step using the session clock.
    pub fn frame(&mut self) -> Option<FrameSnapshot<'_>> {
        let t = self.clock.elapsed().as_secs_f64();
        self.frame_at(t)
    }

    /// Step at an explicit time in seconds (host frame timestamp).
    pub fn frame_at(&mut self, time_sec: f64) -> Option<FrameSnapshot<'_>> {
        if !self.state.alive {
            return None;
        }
        let SessionState {
            buffers,
            target,
            control,
            simulation,
            ..
        } = &mut self.state;
        simulation.step(buffers, target, control, time_sec, &mut self.rng);
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            positions: self.state.buffers.positions(),
            colors: self.state.buffers.render_colors(),
            rotation_y: self.state.simulation.rotation_y(),
        }
    }

    /// UI shape pick: new base shape and a full re-sample of the target.
    pub fn set_shape(&mut self, shape: Shape) {
        log::info!("[session] shape {} -> {}", self.state.control.base_shape, shape);
        self.state.target.resample(&shape, &mut self.rng);
        self.state.control.set_base_shape(shape);
    }

    /// UI gradient pick: recolors in place, positions untouched.
    pub fn set_gradient(&mut self, gradient: Gradient) {
        log::info!("[session] gradient {} -> {}", self.state.gradient.id, gradient.id);
        self.state.buffers.recolor(&gradient);
        self.state.gradient = gradient;
    }

    /// Stop frames and detector callbacks, then stop the detector and release
    /// the renderer. Safe to call more than once.
    pub fn shutdown(
        &mut self,
        detector: &mut dyn DetectorControl,
        renderer: &mut dyn RendererControl,
    ) {
        if !self.state.alive {
            return;
        }
        self.state.alive = false;
        detector.stop();
        renderer.release();
        log::info!("[session] stopped");
    }
}
