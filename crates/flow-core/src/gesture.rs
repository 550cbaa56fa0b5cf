//! Turns per-frame hand observations into the smoothed control signal that
//! drives the simulation.
//!
//! The gesture category is re-derived from raw landmarks every detector frame
//! (level-triggered). Checks run in a fixed priority order and later checks
//! are gated on earlier ones: reveal sub-shape selection, then pinch spin,
//! then fist implosion, then idle spin, then two-hand scaling.

use crate::constants::*;
use crate::landmarks::{wrist_spread, DetectorFrame, Handedness, HandObservation, ThumbTest};
use crate::shapes::Shape;
use crate::simulation::TargetBuffer;
use rand::Rng;

pub const REVEAL_SLOTS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct InterpreterConfig {
    /// Pixel text revealed for 1..=5 extended fingers in fireworks mode.
    pub reveal_texts: [String; REVEAL_SLOTS],
    pub thumb_test: ThumbTest,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            reveal_texts: [
                "HELLO".to_string(),
                "PEACE?".to_string(),
                "THREESOME?".to_string(),
                "FOUR!".to_string(),
                "555".to_string(),
            ],
            thumb_test: ThumbTest::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            SpinDirection::Clockwise => 1.0,
            SpinDirection::CounterClockwise => -1.0,
        }
    }
}

/// Dominant gesture of the most recent detector frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Pinching(SpinDirection),
    Fisted,
    TwoHandScaling,
    /// Reveal slot 1..=5 is on screen.
    RevealShowing(u8),
}

/// Control values read by every simulation step. Holds its last value
/// between detector frames.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSignal {
    /// Fist closedness in [0, 1].
    pub tension: f32,
    /// Two-hand spread scale, 1.0 at rest.
    pub scale: f32,
    /// Radians per frame.
    pub spin_speed: f32,
    pub spin_direction: SpinDirection,
    /// Shape picked in the UI.
    pub base_shape: Shape,
    /// Shape on screen; differs from `base_shape` only while a reveal slot shows.
    pub active_shape: Shape,
    pub reveal_slot: Option<u8>,
    pub gesture: GestureState,
}

impl ControlSignal {
    pub fn new(base_shape: Shape) -> Self {
        let spin_speed = idle_spin(&base_shape);
        Self {
            tension: 0.0,
            scale: SCALE_REST,
            spin_speed,
            spin_direction: SpinDirection::default(),
            active_shape: base_shape.clone(),
            base_shape,
            reveal_slot: None,
            gesture: GestureState::Idle,
        }
    }

    /// Fireworks is the base of the finger-count reveal mode.
    #[inline]
    pub fn in_reveal_mode(&self) -> bool {
        self.base_shape.is_burst()
    }

    #[inline]
    pub fn is_showing_text(&self) -> bool {
        self.reveal_slot.is_some()
    }

    /// Implosion shrink; disabled while text shows so it stays legible.
    pub fn shrink_factor(&self) -> f32 {
        if self.is_showing_text() {
            1.0
        } else {
            1.0 - self.tension * IMPLOSION_STRENGTH
        }
    }

    #[inline]
    pub fn final_scale(&self) -> f32 {
        self.scale * self.shrink_factor()
    }

    /// Burst and reveal shapes sparkle; everything else renders flat.
    #[inline]
    pub fn flickers(&self) -> bool {
        self.active_shape.is_burst() || self.is_showing_text()
    }

    #[inline]
    pub fn spin_step(&self) -> f32 {
        self.spin_speed * self.spin_direction.sign()
    }

    /// Switch the UI-selected shape; any reveal sub-shape is dropped.
    pub fn set_base_shape(&mut self, shape: Shape) {
        self.active_shape = shape.clone();
        self.base_shape = shape;
        self.reveal_slot = None;
    }
}

#[inline]
fn idle_spin(base: &Shape) -> f32 {
    if base.is_burst() {
        0.0
    } else {
        SPIN_IDLE
    }
}

#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    pub config: InterpreterConfig,
}

impl GestureInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    /// Reveal slot and shape for a finger count; 0 or out of range is `None`.
    pub fn reveal_for(&self, fingers: u8) -> Option<(u8, Shape)> {
        let slot = fingers.checked_sub(1)? as usize;
        self.config
            .reveal_texts
            .get(slot)
            .map(|text| (fingers, Shape::Text(text.clone())))
    }

    /// Fold one detector frame into `control`. When the active sub-shape
    /// changes the target buffer is re-sampled wholesale from `rng`.
    pub fn update<R: Rng + ?Sized>(
        &self,
        control: &mut ControlSignal,
        frame: &DetectorFrame,
        target: &mut TargetBuffer,
        rng: &mut R,
    ) {
        let hands = frame.usable_hands();
        if hands.is_empty() {
            self.release(control, target, rng);
            return;
        }

        let reveal_mode = control.in_reveal_mode();

        // 1. finger count picks the reveal sub-shape; the last hand reported wins
        if reveal_mode {
            let fingers = hands
                .last()
                .map(|h| h.extended_fingers(self.config.thumb_test))
                .unwrap_or(0);
            match self.reveal_for(fingers) {
                Some((slot, shape)) => {
                    if control.reveal_slot != Some(slot) {
                        switch_active(control, shape, Some(slot), target, rng);
                    }
                }
                None => {
                    if control.reveal_slot.is_some() {
                        let base = control.base_shape.clone();
                        switch_active(control, base, None, target, rng);
                    }
                }
            }
        }

        // 2.
        let showing_text = control.is_showing_text();

        control.tension =
            hands.iter().map(HandObservation::fist_tension).sum::<f32>() / hands.len() as f32;

        let (left_pinch, right_pinch) = pinch_sides(hands);
        let mut pinched = false;

        // 3-5. spin
        if (left_pinch || right_pinch) && !reveal_mode && !showing_text {
            control.spin_speed = SPIN_FAST;
            match (left_pinch, right_pinch) {
                (false, true) => control.spin_direction = SpinDirection::Clockwise,
                (true, false) => control.spin_direction = SpinDirection::CounterClockwise,
                _ => {}
            }
            pinched = true;
        } else if control.tension > FIST_TENSION_THRESHOLD && !showing_text {
            control.spin_speed = SPIN_IDLE;
        } else {
            control.spin_speed = if reveal_mode || showing_text {
                0.0
            } else {
                SPIN_IDLE
            };
        }

        // 6. scale
        let two_hands = hands.len() >= 2;
        if showing_text {
            control.scale = SCALE_REST;
        } else if two_hands {
            control.scale = SCALE_BASE + wrist_spread(&hands[0], &hands[1]) * SCALE_GAIN;
        } else {
            relax_scale(control);
        }

        control.gesture = match control.reveal_slot {
            Some(slot) => GestureState::RevealShowing(slot),
            None if pinched => GestureState::Pinching(control.spin_direction),
            None if control.tension > FIST_TENSION_THRESHOLD => GestureState::Fisted,
            None if two_hands => GestureState::TwoHandScaling,
            None => GestureState::Idle,
        };
    }

    /// No hands: let tension and scale settle and drop any reveal text.
    fn release<R: Rng + ?Sized>(
        &self,
        control: &mut ControlSignal,
        target: &mut TargetBuffer,
        rng: &mut R,
    ) {
        control.tension *= TENSION_DECAY;
        relax_scale(control);
        control.spin_speed = idle_spin(&control.base_shape);
        if control.reveal_slot.is_some() {
            let base = control.base_shape.clone();
            switch_active(control, base, None, target, rng);
        }
        control.gesture = GestureState::Idle;
    }
}

#[inline]
fn relax_scale(control: &mut ControlSignal) {
    control.scale = control.scale * (1.0 - SCALE_BLEND) + SCALE_REST * SCALE_BLEND;
}

/// Pinch flags per side. A pinch from a hand of unknown side still counts
/// as a pinch but cannot pick a direction.
fn pinch_sides(hands: &[HandObservation]) -> (bool, bool) {
    let mut left = false;
    let mut right = false;
    let mut unknown = false;
    for hand in hands.iter().filter(|h| h.is_pinching()) {
        match hand.handedness {
            Handedness::Left => left = true,
            Handedness::Right => right = true,
            Handedness::Unknown => unknown = true,
        }
    }
    if unknown {
        // reported as "both" so the direction is left unchanged
        return (true, true);
    }
    (left, right)
}

fn switch_active<R: Rng + ?Sized>(
    control: &mut ControlSignal,
    shape: Shape,
    slot: Option<u8>,
    target: &mut TargetBuffer,
    rng: &mut R,
) {
    log::debug!("[gesture] active shape {} -> {}", control.active_shape, shape);
    target.resample(&shape, rng);
    control.active_shape = shape;
    control.reveal_slot = slot;
}
