//! Per-frame particle update: blend every particle toward its scaled target,
//! tremble under high tension, sparkle burst shapes and spin the cloud.

use crate::constants::*;
use crate::error::{FlowError, Result};
use crate::gesture::ControlSignal;
use crate::gradient::Gradient;
use crate::shapes::{sample_with, Shape};
use glam::Vec3;
use rand::Rng;

/// Point cloud the particles are animating toward.
///
/// Replaced wholesale on every shape change and never edited in place, so a
/// reader always sees one complete shape.
#[derive(Clone, Debug)]
pub struct TargetBuffer {
    points: Vec<Vec3>,
    generation: u64,
}

impl TargetBuffer {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            generation: 0,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of wholesale replacements so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a new cloud of the same length; the old one is dropped.
    /// A cloud of any other length is rejected and the current one kept.
    pub fn replace(&mut self, points: Vec<Vec3>) -> Result<()> {
        if points.len() != self.points.len() {
            return Err(FlowError::TargetLengthMismatch {
                expected: self.points.len(),
                got: points.len(),
            });
        }
        self.swap(points);
        Ok(())
    }

    /// Re-sample `shape` at the current particle count.
    pub fn resample<R: Rng + ?Sized>(&mut self, shape: &Shape, rng: &mut R) {
        let points = sample_with(shape, self.points.len(), rng);
        self.swap(points);
    }

    fn swap(&mut self, points: Vec<Vec3>) {
        self.points = points;
        self.generation += 1;
    }
}

/// Fixed-capacity per-particle buffers; allocated once per session.
#[derive(Clone, Debug)]
pub struct ParticleBuffers {
    current: Vec<Vec3>,
    base_colors: Vec<Vec3>,
    render_colors: Vec<Vec3>,
}

impl ParticleBuffers {
    /// Particles scattered uniformly in the initial cube, colored by `gradient`.
    pub fn scattered<R: Rng + ?Sized>(count: usize, gradient: &Gradient, rng: &mut R) -> Self {
        let h = INITIAL_SCATTER_HALF_EXTENT;
        let current = (0..count)
            .map(|_| Vec3::new(rng.gen_range(-h..h), rng.gen_range(-h..h), rng.gen_range(-h..h)))
            .collect();
        Self::from_positions(current, gradient)
    }

    pub fn from_positions(current: Vec<Vec3>, gradient: &Gradient) -> Self {
        let mut base_colors = vec![Vec3::ZERO; current.len()];
        gradient.fill(&mut base_colors);
        let render_colors = base_colors.clone();
        Self {
            current,
            base_colors,
            render_colors,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    #[inline]
    pub fn base_colors(&self) -> &[Vec3] {
        &self.base_colors
    }

    #[inline]
    pub fn render_colors(&self) -> &[Vec3] {
        &self.render_colors
    }

    /// Recolor in place; positions are untouched.
    pub fn recolor(&mut self, gradient: &Gradient) {
        gradient.fill(&mut self.base_colors);
        self.render_colors.copy_from_slice(&self.base_colors);
    }
}

/// Brightness multiplier for particle `index` at `time_sec`.
///
/// Each particle runs its own sine at one of five speeds. Most of the time it
/// shimmers around the base level; near the crest it glows, and right at the
/// crest it flashes.
pub fn flicker(index: usize, time_sec: f64) -> f32 {
    let speed = 2.0 + (index % 5) as f64;
    let offset = index as f64 * 10.0;
    let noise = (time_sec * speed + offset).sin() as f32;
    if noise > FLICKER_FLASH_NOISE {
        FLICKER_FLASH_LEVEL
    } else if noise > FLICKER_GLOW_NOISE {
        FLICKER_GLOW_LEVEL
    } else {
        FLICKER_BASE + noise * FLICKER_SHIMMER
    }
}

/// Whole-cloud orientation. Persists across shape changes.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    rotation_y: f32,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Advance one rendered frame.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        buffers: &mut ParticleBuffers,
        target: &TargetBuffer,
        control: &ControlSignal,
        time_sec: f64,
        rng: &mut R,
    ) {
        let final_scale = control.final_scale();
        let jitter = if control.tension > JITTER_TENSION_THRESHOLD {
            (control.tension - JITTER_TENSION_THRESHOLD) * JITTER_GAIN
        } else {
            0.0
        };
        let flickers = control.flickers();

        let ParticleBuffers {
            current,
            base_colors,
            render_colors,
        } = buffers;
        for (i, (pos, goal)) in current.iter_mut().zip(target.points()).enumerate() {
            let mut aim = *goal * final_scale;
            if jitter > 0.0 {
                aim += Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ) * jitter;
            }
            *pos += (aim - *pos) * CONVERGENCE_RATE;

            let gain = if flickers { flicker(i, time_sec) } else { 1.0 };
            render_colors[i] = base_colors[i] * gain;
        }

        self.rotation_y += control.spin_step();
    }
}
