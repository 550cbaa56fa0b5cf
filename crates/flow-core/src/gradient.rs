//! Particle color gradients and the built-in palettes.

use crate::error::{FlowError, Result};
use glam::Vec3;

/// Two- or three-stop RGB gradient. Channels are in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub id: String,
    pub name: String,
    pub start: Vec3,
    pub mid: Option<Vec3>,
    pub end: Vec3,
}

// (id, name, start, mid, end)
const PALETTES: [(&str, &str, u32, Option<u32>, u32); 6] = [
    ("golden", "Golden Depths", 0xFFD700, Some(0xFF8C00), 0x8B4513),
    ("sunset", "Sunset Dream", 0xFF6B6B, None, 0xFFD93D),
    ("ocean", "Ocean Depths", 0x4ECDC4, None, 0x1A535C),
    ("aurora", "Aurora Borealis", 0xB084CC, None, 0x87E0C4),
    ("ember", "Ember Glow", 0xF72585, None, 0xFF9E00),
    ("galaxy", "Galaxy Night", 0x7209B7, None, 0xF72585),
];

impl Gradient {
    /// Build a gradient from hex color strings such as `#FF8C00`.
    pub fn from_hex(id: &str, name: &str, start: &str, mid: Option<&str>, end: &str) -> Result<Self> {
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            start: parse_hex_color(start)?,
            mid: mid.map(parse_hex_color).transpose()?,
            end: parse_hex_color(end)?,
        })
    }

    /// All built-in palettes, in picker order.
    pub fn palettes() -> Vec<Gradient> {
        PALETTES
            .iter()
            .map(|&(id, name, start, mid, end)| Gradient {
                id: id.to_string(),
                name: name.to_string(),
                start: rgb_from_u32(start),
                mid: mid.map(rgb_from_u32),
                end: rgb_from_u32(end),
            })
            .collect()
    }

    pub fn by_id(id: &str) -> Result<Gradient> {
        Self::palettes()
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| FlowError::UnknownGradient(id.to_string()))
    }

    /// Color at `t` in [0, 1]. With a mid stop the first half runs
    /// start -> mid and the second half mid -> end.
    pub fn color_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        match self.mid {
            Some(mid) if t < 0.5 => self.start.lerp(mid, t * 2.0),
            Some(mid) => mid.lerp(self.end, (t - 0.5) * 2.0),
            None => self.start.lerp(self.end, t),
        }
    }

    /// Recolor `colors` in place; particle `i` of `N` gets `color_at(i / N)`.
    pub fn fill(&self, colors: &mut [Vec3]) {
        let n = colors.len().max(1) as f32;
        for (i, c) in colors.iter_mut().enumerate() {
            *c = self.color_at(i as f32 / n);
        }
    }
}

impl Default for Gradient {
    fn default() -> Self {
        let (id, name, start, mid, end) = PALETTES[0];
        Gradient {
            id: id.to_string(),
            name: name.to_string(),
            start: rgb_from_u32(start),
            mid: mid.map(rgb_from_u32),
            end: rgb_from_u32(end),
        }
    }
}

#[inline]
fn rgb_from_u32(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

/// Parse `#RRGGBB`, `RRGGBB` or `#RGB`.
pub fn parse_hex_color(s: &str) -> Result<Vec3> {
    let digits = s.trim().trim_start_matches('#');
    let invalid = || FlowError::InvalidColor(s.to_string());
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let hex = match digits.len() {
        6 => u32::from_str_radix(digits, 16).map_err(|_| invalid())?,
        3 => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            u32::from_str_radix(&doubled, 16).map_err(|_| invalid())?
        }
        _ => return Err(invalid()),
    };
    Ok(rgb_from_u32(hex))
}
