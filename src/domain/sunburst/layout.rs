use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::value_objects::{RingLevel, RingSet, Segment};
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// Geometry knobs for the radial partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Angular gap between neighbouring wedges, radians
    pub pad_angle: f64,
    /// Radial gap between rings
    pub ring_gap: f64,
    /// Thickness cap so a lone ring does not fill the whole disc
    pub max_ring_thickness: f64,
    /// Rings whose inner edge would fall below this are dropped
    pub min_inner_radius: f64,
    pub corner_radius: f64,
    /// Below this span (radians) the primary label is suppressed
    pub primary_label_min_angle: f64,
    /// Below this span the percentage label is suppressed; larger than the primary threshold
    pub secondary_label_min_angle: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pad_angle: 0.01,
            ring_gap: 4.0,
            max_ring_thickness: 70.0,
            min_inner_radius: 24.0,
            corner_radius: 4.0,
            primary_label_min_angle: 0.12,
            secondary_label_min_angle: 0.3,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("padAngle", self.pad_angle),
            ("ringGap", self.ring_gap),
            ("maxRingThickness", self.max_ring_thickness),
            ("minInnerRadius", self.min_inner_radius),
            ("cornerRadius", self.corner_radius),
            ("primaryLabelMinAngle", self.primary_label_min_angle),
            ("secondaryLabelMinAngle", self.secondary_label_min_angle),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
            return Err(format!("{} must be a non-negative number, got {}", name, value));
        }
        if self.max_ring_thickness <= 0.0 {
            return Err("maxRingThickness must be positive".to_string());
        }
        if self.secondary_label_min_angle <= self.primary_label_min_angle {
            return Err("secondaryLabelMinAngle must exceed primaryLabelMinAngle".to_string());
        }
        Ok(())
    }
}

/// Placed wedge. Angles run clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcGeometry {
    pub segment: Segment,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Gap actually taken out of this wedge's share of the turn
    pub pad_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub corner_radius: f64,
    pub suppress_primary_label: bool,
    pub suppress_secondary_label: bool,
}

impl ArcGeometry {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Label position relative to the center (y grows downwards)
    pub fn label_anchor(&self) -> (f64, f64) {
        polar_to_cartesian(self.mid_angle(), (self.inner_radius + self.outer_radius) / 2.0)
    }

    pub fn contains(&self, angle: f64, radius: f64) -> bool {
        radius >= self.inner_radius
            && radius <= self.outer_radius
            && angle >= self.start_angle
            && angle <= self.end_angle
    }
}

/// One laid-out ring
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingGeometry {
    pub level: RingLevel,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub arcs: Vec<ArcGeometry>,
}

impl RingGeometry {
    /// Arc under a point given relative to the center; gaps hit nothing
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&ArcGeometry> {
        let (angle, radius) = cartesian_to_polar(x, y);
        if radius < self.inner_radius || radius > self.outer_radius {
            return None;
        }
        self.arcs.iter().find(|arc| arc.contains(angle, radius))
    }
}

pub fn polar_to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Inverse of [`polar_to_cartesian`], angle normalized to `[0, 2π)`
pub fn cartesian_to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.atan2(-y).rem_euclid(TAU), x.hypot(y))
}

/// Pure mapping from weighted segments to ring geometry
#[derive(Debug, Clone, Default)]
pub struct RadialPartitionLayout {
    config: LayoutConfig,
}

impl RadialPartitionLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Common thickness of every ring when `ring_count` rings share the disc
    pub fn ring_thickness(&self, max_radius: f64, ring_count: usize) -> f64 {
        (max_radius / (ring_count as f64 + 0.5)).min(self.config.max_ring_thickness)
    }

    /// `(inner, outer)` radii of ring `ring_index`, or `None` when it would be too thin
    pub fn ring_radii(&self, ring_index: usize, max_radius: f64, ring_count: usize) -> Option<(f64, f64)> {
        if ring_count == 0 || ring_index >= ring_count || !(max_radius > 0.0) {
            return None;
        }
        let thickness = self.ring_thickness(max_radius, ring_count);
        let outer = max_radius - ring_index as f64 * (thickness + self.config.ring_gap);
        let inner = outer - thickness;
        if inner < self.config.min_inner_radius {
            return None;
        }
        Some((inner, outer))
    }

    /// Partition the full turn among `segments` in input order.
    ///
    /// Each segment owns `2π · value / Σvalue` of the turn, minus a centred pad;
    /// owned shares tile the circle exactly. Returns nothing when the ring does
    /// not fit.
    pub fn layout_ring(
        &self,
        segments: &[Segment],
        ring_index: usize,
        max_radius: f64,
        ring_count: usize,
    ) -> Vec<ArcGeometry> {
        if segments.is_empty() {
            return Vec::new();
        }
        let Some((inner_radius, outer_radius)) = self.ring_radii(ring_index, max_radius, ring_count) else {
            log_debug!(
                LogComponent::Domain("RadialLayout"),
                "Ring {} of {} dropped at radius {:.1}",
                ring_index,
                ring_count,
                max_radius
            );
            return Vec::new();
        };
        let corner_radius = self.config.corner_radius.min((outer_radius - inner_radius) / 2.0);

        let weights: Vec<f64> = segments
            .iter()
            .map(|segment| if segment.value.is_finite() { segment.value.max(0.0) } else { 0.0 })
            .collect();
        let total: f64 = weights.iter().sum();
        let share_of = |weight: f64| {
            if total > 0.0 { TAU * weight / total } else { TAU / segments.len() as f64 }
        };

        let last = segments.len() - 1;
        let mut cursor = 0.0;
        segments
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(index, (segment, weight))| {
                // close the turn exactly on the last wedge
                let share = if index == last { TAU - cursor } else { share_of(weight) };
                let pad_angle = self.config.pad_angle.min(share);
                let start_angle = cursor + pad_angle / 2.0;
                let end_angle = cursor + share - pad_angle / 2.0;
                cursor += share;

                let span = end_angle - start_angle;
                ArcGeometry {
                    segment: segment.clone(),
                    start_angle,
                    end_angle,
                    pad_angle,
                    inner_radius,
                    outer_radius,
                    corner_radius,
                    suppress_primary_label: span < self.config.primary_label_min_angle,
                    suppress_secondary_label: span < self.config.secondary_label_min_angle,
                }
            })
            .collect()
    }

    /// Lay out every ring of `rings`; rings that do not fit are left out
    pub fn layout_rings(&self, rings: &RingSet, max_radius: f64) -> Vec<RingGeometry> {
        let ring_count = rings.len();
        rings
            .iter()
            .enumerate()
            .filter_map(|(ring_index, ring)| {
                let (inner_radius, outer_radius) = self.ring_radii(ring_index, max_radius, ring_count)?;
                let arcs = self.layout_ring(&ring.segments, ring_index, max_radius, ring_count);
                Some(RingGeometry { level: ring.level, inner_radius, outer_radius, arcs })
            })
            .collect()
    }
}
