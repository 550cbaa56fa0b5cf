//! Synthetic hand poses.
//!
//! Builds anatomically ordered 21-landmark hands for a handful of canonical
//! gestures, so hosts without a camera (and tests) can drive the gesture
//! interpreter through the same landmark geometry a real detector reports.

use crate::landmarks::*;
use glam::{Vec2, Vec3};

/// Horizontal MCP offsets from the wrist, thumb side first.
const FINGER_OFFSETS: [f32; 4] = [-0.045, -0.015, 0.015, 0.045];
const PALM_LENGTH: f32 = 0.16;
const FINGER_LENGTH: f32 = 0.16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Digit {
    Extended,
    Curled,
    /// Index and thumb tips brought together.
    Pinched,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    /// Wrist position in normalized image space.
    pub wrist: Vec2,
    pub handedness: Handedness,
    pub thumb: Digit,
    /// Index, middle, ring, pinky.
    pub fingers: [Digit; 4],
}

impl HandPose {
    pub fn open(wrist: Vec2, handedness: Handedness) -> Self {
        Self {
            wrist,
            handedness,
            thumb: Digit::Extended,
            fingers: [Digit::Extended; 4],
        }
    }

    pub fn fist(wrist: Vec2, handedness: Handedness) -> Self {
        Self {
            wrist,
            handedness,
            thumb: Digit::Curled,
            fingers: [Digit::Curled; 4],
        }
    }

    /// Thumb-index pinch with the remaining fingers extended.
    pub fn pinch(wrist: Vec2, handedness: Handedness) -> Self {
        Self {
            wrist,
            handedness,
            thumb: Digit::Pinched,
            fingers: [
                Digit::Pinched,
                Digit::Extended,
                Digit::Extended,
                Digit::Extended,
            ],
        }
    }

    /// Show `n` fingers: index first, pinky fourth, thumb only at five.
    pub fn counting(n: u8, wrist: Vec2, handedness: Handedness) -> Self {
        let mut fingers = [Digit::Curled; 4];
        for f in fingers.iter_mut().take(n.min(4) as usize) {
            *f = Digit::Extended;
        }
        Self {
            wrist,
            handedness,
            thumb: if n >= 5 { Digit::Extended } else { Digit::Curled },
            fingers,
        }
    }

    pub fn to_observation(&self) -> HandObservation {
        // The thumb sits on -x for a right hand and on +x for a left one.
        let mirror = match self.handedness {
            Handedness::Left => -1.0,
            Handedness::Right | Handedness::Unknown => 1.0,
        };
        let w = self.wrist;
        let at = |dx: f32, dy: f32| Vec3::new(w.x + dx * mirror, w.y + dy, 0.0);

        let mut lm = [Vec3::ZERO; LANDMARK_COUNT];
        lm[WRIST] = at(0.0, 0.0);

        let pinch_tip = (FINGER_OFFSETS[0] - 0.03, -(PALM_LENGTH + 0.07));

        lm[THUMB_CMC] = at(-0.05, -0.03);
        lm[THUMB_MCP] = at(-0.09, -0.06);
        match self.thumb {
            Digit::Extended => {
                lm[THUMB_IP] = at(-0.13, -0.07);
                lm[THUMB_TIP] = at(-0.20, -0.08);
            }
            Digit::Curled => {
                lm[THUMB_IP] = at(-0.13, -0.10);
                lm[THUMB_TIP] = at(-0.10, -0.15);
            }
            Digit::Pinched => {
                lm[THUMB_IP] = at(-0.11, -0.15);
                lm[THUMB_TIP] = at(pinch_tip.0 + 0.01, pinch_tip.1);
            }
        }

        let joints = [
            (INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP),
            (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP),
            (RING_MCP, RING_PIP, RING_DIP, RING_TIP),
            (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP),
        ];
        for (i, &(mcp, pip, dip, tip)) in joints.iter().enumerate() {
            let ox = FINGER_OFFSETS[i];
            let base = -PALM_LENGTH;
            lm[mcp] = at(ox, base);
            match self.fingers[i] {
                Digit::Extended => {
                    lm[pip] = at(ox, base - 0.06);
                    lm[dip] = at(ox, base - 0.11);
                    lm[tip] = at(ox, base - FINGER_LENGTH);
                }
                Digit::Curled => {
                    lm[pip] = at(ox, base - 0.03);
                    lm[dip] = at(ox, -0.09);
                    lm[tip] = at(ox, -0.05);
                }
                Digit::Pinched => {
                    lm[pip] = at(ox - 0.01, base - 0.05);
                    lm[dip] = at(ox - 0.02, base - 0.07);
                    lm[tip] = at(pinch_tip.0, pinch_tip.1);
                }
            }
        }

        HandObservation::new(lm, self.handedness)
    }
}
