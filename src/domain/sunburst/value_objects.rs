use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::domain::hierarchy::NodeId;
use crate::domain::market_data::Symbol;

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse_hex(value: &str) -> Result<Self, String> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(format!("expected #rrggbb, got {:?}", value));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| format!("expected #rrggbb, got {:?}", value))
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!("rgba({}, {}, {}, {:.2})", hex >> 16, (hex >> 8) & 0xFF, hex & 0xFF, self.a)
        }
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// Raise HSL lightness by `amount` (0..1), keeping hue and saturation
    pub fn lighten(&self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let mut lighter = Self::from_hsl(h, s, (l + amount).clamp(0.0, 1.0));
        lighter.a = self.a;
        lighter
    }

    fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;
        let delta = max - min;
        if delta.abs() < f32::EPSILON {
            return (0.0, 0.0, l);
        }
        let s = if l > 0.5 { delta / (2.0 - max - min) } else { delta / (max + min) };
        let h = if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (h / 6.0, s, l)
    }

    fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        if s.abs() < f32::EPSILON {
            return Self::rgb(l, l, l);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let hue = |t: f32| {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Self::rgb(hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0))
    }

    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const SURFACE: Color = Color { r: 0.09, g: 0.11, b: 0.15, a: 1.0 };
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Value Object - ring depth, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RingLevel {
    #[display(fmt = "ETF")]
    Etf = 0,
    #[display(fmt = "Sector")]
    Sector = 1,
    #[display(fmt = "Instrument")]
    Instrument = 2,
    #[display(fmt = "Fundamentals")]
    Fundamentals = 3,
}

impl RingLevel {
    pub const ALL: [RingLevel; 4] =
        [RingLevel::Etf, RingLevel::Sector, RingLevel::Instrument, RingLevel::Fundamentals];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The fundamentals ring is informational only
    pub fn is_drillable(&self) -> bool {
        !matches!(self, RingLevel::Fundamentals)
    }
}

/// Renderable wedge of one ring
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: NodeId,
    pub label: String,
    pub display_label: String,
    /// Sizing weight, never below the segment floor
    pub value: f64,
    pub color: Color,
    pub change: f64,
    pub change_percent: f64,
    pub ring_level: RingLevel,
    pub parent_id: Option<NodeId>,
    pub instrument_ref: Option<Symbol>,
}

/// One ring's segments in hierarchy order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub level: RingLevel,
    pub parent_id: Option<NodeId>,
    pub segments: Vec<Segment>,
}

impl Ring {
    pub fn total_value(&self) -> f64 {
        self.segments.iter().map(|segment| segment.value).sum()
    }

    pub fn find(&self, id: &NodeId) -> Option<&Segment> {
        self.segments.iter().find(|segment| &segment.id == id)
    }
}

/// Rings currently exposed by the drill path, ring 0 first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RingSet {
    pub rings: Vec<Ring>,
}

impl RingSet {
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn ring(&self, level: RingLevel) -> Option<&Ring> {
        self.rings.get(level.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ring> {
        self.rings.iter()
    }

    pub fn find_segment(&self, level: RingLevel, id: &NodeId) -> Option<&Segment> {
        self.ring(level).and_then(|ring| ring.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_css() {
        let color = Color::parse_hex("#4e79a7").unwrap();
        assert_eq!(color.to_hex(), 0x4e79a7);
        assert_eq!(color.to_css(), "#4e79a7");
        assert_eq!(color.with_alpha(0.5).to_css(), "rgba(78, 121, 167, 0.50)");
        assert!(Color::parse_hex("#12345").is_err());
    }

    #[test]
    fn lighten_raises_every_channel_of_a_saturated_color() {
        let base = Color::from_hex(0x4e79a7);
        let lighter = base.lighten(0.15);
        assert!(lighter.r > base.r && lighter.g > base.g && lighter.b > base.b);
        assert_eq!(Color::WHITE.lighten(0.3), Color::WHITE);
    }

    #[test]
    fn ring_levels_by_index() {
        assert_eq!(RingLevel::from_index(2), Some(RingLevel::Instrument));
        assert_eq!(RingLevel::from_index(4), None);
        assert!(!RingLevel::Fundamentals.is_drillable());
    }
}
