// Host-side tests for tuning constants and their relationships.

use flow_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn blend_factors_are_fractions() {
    assert!(CONVERGENCE_RATE > 0.0 && CONVERGENCE_RATE < 1.0);
    assert!(SCALE_BLEND > 0.0 && SCALE_BLEND < 1.0);
    assert!(TENSION_DECAY > 0.0 && TENSION_DECAY < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn implosion_never_inverts_the_shape() {
    // tension tops out at 1.0
    assert!(IMPLOSION_STRENGTH > 0.0 && IMPLOSION_STRENGTH < 1.0);
    assert!(JITTER_TENSION_THRESHOLD < 1.0);
    assert!(FIST_TENSION_THRESHOLD < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn flicker_levels_are_ordered() {
    assert!(FLICKER_GLOW_NOISE < FLICKER_FLASH_NOISE && FLICKER_FLASH_NOISE < 1.0);
    assert!(FLICKER_GLOW_LEVEL < FLICKER_FLASH_LEVEL);
    // shimmer never reaches the glow level
    assert!(FLICKER_BASE + FLICKER_SHIMMER * FLICKER_GLOW_NOISE < FLICKER_GLOW_LEVEL);
    assert!(FLICKER_BASE - FLICKER_SHIMMER > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn spin_speeds_are_ordered() {
    assert!(SPIN_IDLE > 0.0);
    assert!(SPIN_FAST > SPIN_IDLE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scale_rest_sits_inside_two_hand_range() {
    // wrist spread is in [0, sqrt(2)] in normalized image space
    let max_spread = std::f32::consts::SQRT_2;
    assert!(SCALE_BASE < SCALE_REST);
    assert!(SCALE_BASE + max_spread * SCALE_GAIN > SCALE_REST);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn saturn_ring_clears_the_sphere() {
    assert!(SATURN_SPHERE_PROBABILITY > 0.0 && SATURN_SPHERE_PROBABILITY < 1.0);
    assert!(SATURN_RING_INNER > SATURN_SPHERE_RADIUS);
    assert!(SATURN_RING_OUTER > SATURN_RING_INNER);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn glyph_spacing_leaves_a_gap() {
    assert!(GLYPH_GAP > GLYPH_CELL);
    assert!(TEXT_DEPTH > 0.0);
}
