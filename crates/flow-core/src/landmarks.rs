//! Hand landmark observations as delivered by an external detector, plus the
//! per-hand metrics the gesture interpreter is built on.
//!
//! Coordinates are normalized image space: x to the right, y downward, z
//! roughly in the same units as x.

use crate::constants::*;
use crate::error::{FlowError, Result};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::str::FromStr;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// (tip, mcp) for the four non-thumb fingers.
pub const FINGER_TIP_MCP: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl FromStr for Handedness {
    type Err = std::convert::Infallible;

    /// Anything other than `Left`/`Right` maps to `Unknown`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Left" | "left" => Handedness::Left,
            "Right" | "right" => Handedness::Right,
            _ => Handedness::Unknown,
        })
    }
}

/// How the thumb is judged extended when counting fingers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThumbTest {
    /// Planar tip-to-index-MCP distance above `threshold` (abduction).
    IndexMcpDistance { threshold: f32 },
    /// Tip sits further out horizontally than the IP joint, measured away
    /// from the pinky MCP, by more than `margin`.
    TipIpOffset { margin: f32 },
}

impl Default for ThumbTest {
    fn default() -> Self {
        ThumbTest::IndexMcpDistance {
            threshold: THUMB_INDEX_MCP_DISTANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub landmarks: [Vec3; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandObservation {
    pub fn new(landmarks: [Vec3; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Build from `21 * 3` packed floats (x, y, z per landmark).
    pub fn from_flat(values: &[f32], handedness: Handedness) -> Result<Self> {
        if values.len() != LANDMARK_COUNT * 3 {
            return Err(FlowError::MalformedHand {
                expected: LANDMARK_COUNT * 3,
                got: values.len(),
            });
        }
        let mut landmarks = [Vec3::ZERO; LANDMARK_COUNT];
        for (i, (slot, xyz)) in landmarks.iter_mut().zip(values.chunks_exact(3)).enumerate() {
            let p = Vec3::new(xyz[0], xyz[1], xyz[2]);
            if !p.is_finite() {
                return Err(FlowError::NonFiniteLandmark { index: i });
            }
            *slot = p;
        }
        Ok(Self::new(landmarks, handedness))
    }

    #[inline]
    pub fn wrist(&self) -> Vec3 {
        self.landmarks[WRIST]
    }

    /// Mean wrist-to-fingertip distance over all five fingers.
    pub fn mean_fingertip_reach(&self) -> f32 {
        let wrist = self.wrist();
        FINGERTIPS
            .iter()
            .map(|&tip| self.landmarks[tip].distance(wrist))
            .sum::<f32>()
            / FINGERTIPS.len() as f32
    }

    /// Fist closedness in [0, 1]; a flat open hand is near 0.
    pub fn fist_tension(&self) -> f32 {
        ((FIST_REFERENCE_DISTANCE - self.mean_fingertip_reach()) * FIST_GAIN).clamp(0.0, 1.0)
    }

    pub fn is_pinching(&self) -> bool {
        self.landmarks[THUMB_TIP].distance(self.landmarks[INDEX_TIP]) < PINCH_DISTANCE
    }

    pub fn thumb_extended(&self, test: ThumbTest) -> bool {
        let tip = self.landmarks[THUMB_TIP];
        match test {
            ThumbTest::IndexMcpDistance { threshold } => {
                planar(tip).distance(planar(self.landmarks[INDEX_MCP])) > threshold
            }
            ThumbTest::TipIpOffset { margin } => {
                let ip = self.landmarks[THUMB_IP];
                let outward = (ip.x - self.landmarks[PINKY_MCP].x).signum();
                (tip.x - ip.x) * outward > margin
            }
        }
    }

    /// Extended fingers, 0..=5. A finger other than the thumb counts when its
    /// tip is above its MCP joint by more than the extension margin.
    pub fn extended_fingers(&self, thumb: ThumbTest) -> u8 {
        let fingers = FINGER_TIP_MCP
            .iter()
            .filter(|&&(tip, mcp)| {
                self.landmarks[tip].y < self.landmarks[mcp].y - FINGER_EXTENSION_MARGIN
            })
            .count() as u8;
        fingers + u8::from(self.thumb_extended(thumb))
    }
}

#[inline]
fn planar(p: Vec3) -> Vec2 {
    p.truncate()
}

/// Planar (x, y) distance between two wrists.
#[inline]
pub fn wrist_spread(a: &HandObservation, b: &HandObservation) -> f32 {
    planar(a.wrist()).distance(planar(b.wrist()))
}

/// One detector callback's worth of hands.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorFrame {
    pub hands: SmallVec<[HandObservation; 2]>,
    /// False when the detector flagged the frame as unusable.
    pub valid: bool,
}

impl Default for DetectorFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl DetectorFrame {
    pub fn empty() -> Self {
        Self {
            hands: SmallVec::new(),
            valid: true,
        }
    }

    pub fn with_hands<I: IntoIterator<Item = HandObservation>>(hands: I) -> Self {
        Self {
            hands: hands.into_iter().collect(),
            valid: true,
        }
    }

    /// Build from packed landmark floats (`63` per hand), one handedness
    /// label per hand and the detector's frame-valid flag. Malformed hands
    /// are dropped rather than failing the frame.
    pub fn from_flat(values: &[f32], handedness: &[Handedness], valid: bool) -> Self {
        let stride = LANDMARK_COUNT * 3;
        let mut hands = SmallVec::new();
        let hand_count = handedness.len().max(values.len().div_ceil(stride));
        for i in 0..hand_count {
            let start = (i * stride).min(values.len());
            let end = ((i + 1) * stride).min(values.len());
            let label = handedness.get(i).copied().unwrap_or_default();
            match HandObservation::from_flat(&values[start..end], label) {
                Ok(hand) => hands.push(hand),
                Err(e) => log::warn!("[gesture] dropping hand {i}: {e}"),
            }
        }
        Self { hands, valid }
    }

    /// Hands usable this frame; an invalid frame has none.
    pub fn usable_hands(&self) -> &[HandObservation] {
        if self.valid {
            &self.hands[..]
        } else {
            &[]
        }
    }
}
