//! Point-cloud samplers for every shape archetype.
//!
//! A shape is a sampling distribution, not a mesh: each call draws `count`
//! independent points, so particle `i` has no fixed anatomical meaning.

use crate::constants::*;
use crate::error::FlowError;
use crate::glyphs::layout_text;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    Heart,
    Flower,
    /// Sphere with an oblique ring.
    Saturn,
    /// Seated figure built from three ellipsoids.
    Buddha,
    /// Center-weighted burst; also the base of the finger-count reveal mode.
    #[default]
    Fireworks,
    /// Blocky 5x5 pixel text.
    Text(String),
}

impl Shape {
    /// Shapes offered by the shape picker.
    pub const SELECTABLE: [Shape; 5] = [
        Shape::Heart,
        Shape::Flower,
        Shape::Saturn,
        Shape::Buddha,
        Shape::Fireworks,
    ];

    pub fn name(&self) -> &str {
        match self {
            Shape::Heart => "heart",
            Shape::Flower => "flower",
            Shape::Saturn => "saturn",
            Shape::Buddha => "buddha",
            Shape::Fireworks => "fireworks",
            Shape::Text(text) => text,
        }
    }

    #[inline]
    pub fn is_burst(&self) -> bool {
        matches!(self, Shape::Fireworks)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Text(text) => write!(f, "text({text:?})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Shape {
    type Err = FlowError;

    /// Parse a picker name. `text:HELLO` selects pixel text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(text) = name.strip_prefix("text:") {
            return Ok(Shape::Text(text.to_string()));
        }
        match name.to_ascii_lowercase().as_str() {
            "heart" => Ok(Shape::Heart),
            "flower" => Ok(Shape::Flower),
            "saturn" => Ok(Shape::Saturn),
            "buddha" => Ok(Shape::Buddha),
            "fireworks" => Ok(Shape::Fireworks),
            _ => Err(FlowError::UnknownShape(s.to_string())),
        }
    }
}

/// Draw `count` points for `shape` using thread-local randomness.
pub fn sample(shape: &Shape, count: usize) -> Vec<Vec3> {
    sample_with(shape, count, &mut thread_rng())
}

/// Draw `count` points for `shape` from `rng`.
pub fn sample_with<R: Rng + ?Sized>(shape: &Shape, count: usize, rng: &mut R) -> Vec<Vec3> {
    match shape {
        Shape::Heart => (0..count).map(|_| heart_point(rng)).collect(),
        Shape::Flower => (0..count).map(|_| flower_point(rng)).collect(),
        Shape::Saturn => (0..count).map(|_| saturn_point(rng)).collect(),
        Shape::Buddha => (0..count).map(|_| buddha_point(rng)).collect(),
        Shape::Fireworks => (0..count).map(|_| burst_point(rng)).collect(),
        Shape::Text(text) => text_points(text, count, rng),
    }
}

/// Uniform in [-0.5, 0.5) scaled by `span`.
#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

/// Uniform direction on the unit sphere via inverse-cosine latitude.
#[inline]
fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

fn heart_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = rng.gen::<f32>() * TAU;
    let hx = 16.0 * t.sin().powi(3);
    let hy = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let base = Vec3::new(hx * HEART_SCALE, hy * HEART_SCALE, centered(rng, HEART_DEPTH));
    base + Vec3::new(
        centered(rng, HEART_JITTER),
        centered(rng, HEART_JITTER),
        centered(rng, HEART_JITTER),
    )
}

fn flower_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let r = (FLOWER_PETALS * theta).cos();
    let phase = centered(rng, PI);
    Vec3::new(
        r * theta.cos() * FLOWER_RADIUS,
        r * theta.sin() * FLOWER_RADIUS,
        phase.sin() * 0.5 + centered(rng, 1.0),
    )
}

fn saturn_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    if rng.gen::<f32>() < SATURN_SPHERE_PROBABILITY {
        return unit_direction(rng) * SATURN_SPHERE_RADIUS;
    }
    let theta = rng.gen::<f32>() * TAU;
    let r = rng.gen_range(SATURN_RING_INNER..SATURN_RING_OUTER);
    let flat = Vec3::new(
        r * theta.cos(),
        centered(rng, SATURN_RING_THICKNESS),
        r * theta.sin(),
    );
    glam::Quat::from_rotation_x(SATURN_TILT) * flat
}

fn buddha_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // (probability mass, radii, center)
    const PARTS: [(f32, Vec3, Vec3); 3] = [
        (0.2, Vec3::new(0.6, 0.6, 0.6), Vec3::new(0.0, 1.8, 0.0)),
        (0.4, Vec3::new(0.9, 1.1, 0.8), Vec3::new(0.0, 0.5, 0.0)),
        (0.4, Vec3::new(1.6, 0.6, 1.2), Vec3::new(0.0, -0.8, 0.0)),
    ];
    let pick = rng.gen::<f32>();
    let mut acc = 0.0;
    let mut chosen = &PARTS[PARTS.len() - 1];
    for part in &PARTS {
        acc += part.0;
        if pick < acc {
            chosen = part;
            break;
        }
    }
    unit_direction(rng) * chosen.1 + chosen.2
}

/// Radius is uniform in [0, R), not cube-root distributed: the burst is
/// intentionally denser toward its center.
fn burst_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r = rng.gen::<f32>() * BURST_RADIUS;
    unit_direction(rng) * r
}

fn text_points<R: Rng + ?Sized>(text: &str, count: usize, rng: &mut R) -> Vec<Vec3> {
    let cells = layout_text(text);
    if cells.is_empty() {
        return vec![Vec3::ZERO; count];
    }
    (0..count)
        .map(|_| {
            let cell = cells[rng.gen_range(0..cells.len())];
            Vec3::new(cell.x, cell.y, centered(rng, TEXT_DEPTH))
        })
        .collect()
}
