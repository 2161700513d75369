//! Pure placement math for the five layout families
//!
//! [`layout`] maps a trimmed input string to an ordered sequence of
//! [`Placement`] units. Straight and Monogram produce one whole-string
//! unit; Stacked, Arched, and Circular produce one unit per character.
//! The function is pure: no I/O, no shared state, same inputs in, same
//! placements out.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// The five supported placement strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Straight,
    Arched,
    Circular,
    Monogram,
    Stacked,
}

impl LayoutMode {
    /// Parses the wire name of a mode. Unknown names fall back to
    /// `Straight` rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "straight" => Self::Straight,
            "arched" => Self::Arched,
            "circular" => Self::Circular,
            "monogram" => Self::Monogram,
            "stacked" => Self::Stacked,
            other => {
                log::warn!("unknown layout mode {other:?}, falling back to straight");
                Self::Straight
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Arched => "arched",
            Self::Circular => "circular",
            Self::Monogram => "monogram",
            Self::Stacked => "stacked",
        }
    }
}

/// One renderable text unit: the whole string, or a single character.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Display substring for this unit
    pub text: String,
    /// Insertion point, Y up
    pub position: Point,
    /// Rotation in degrees, counter-clockwise. 0 for non-arc modes.
    pub rotation_deg: f64,
    /// Glyph size in layout units
    pub font_size: f64,
}

/// Radius rules for the arc layouts.
///
/// The fabrication output and the raster preview grow their arcs with
/// different floors and coefficients. Each emitter path supplies its own
/// profile, so the radius formula exists exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcProfile {
    /// Smallest radius an arc may shrink to. Keeps short strings from
    /// collapsing onto a near-zero circle.
    pub min_radius: f64,
    /// Divisor applied to `font_size * char_count` when growing the
    /// radius with string length.
    pub growth_divisor: f64,
}

impl ArcProfile {
    /// Constants used by the vector (fabrication) output.
    pub const VECTOR: ArcProfile = ArcProfile {
        min_radius: 50.0,
        growth_divisor: TAU,
    };

    /// Constants used by the raster preview at a given zoom scale.
    pub fn raster(scale: f64) -> ArcProfile {
        ArcProfile {
            min_radius: 150.0 * scale,
            growth_divisor: PI,
        }
    }

    fn radius(&self, font_size: f64, chars: usize) -> f64 {
        (font_size * chars as f64 / self.growth_divisor).max(self.min_radius)
    }
}

/// Line advance multiplier for the stacked layout.
pub const STACK_LEADING: f64 = 1.5;

/// How many characters a monogram keeps.
pub const MONOGRAM_LEN: usize = 3;

/// Monogram glyphs render at this multiple of the requested height.
pub const MONOGRAM_SCALE: f64 = 2.0;

/// Computes placement units for `text` in the requested mode.
///
/// Input is trimmed first; empty or whitespace-only input produces no
/// placements. `height` is the glyph size in layout units and must be
/// positive. Arc radius behavior comes from `arc`.
pub fn layout(text: &str, mode: LayoutMode, height: f64, arc: ArcProfile) -> Vec<Placement> {
    debug_assert!(height > 0.0, "glyph height must be positive");

    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    match mode {
        LayoutMode::Straight => vec![Placement {
            text: text.to_owned(),
            position: Point::ORIGIN,
            rotation_deg: 0.0,
            font_size: height,
        }],
        LayoutMode::Monogram => {
            let initials: String = text.chars().take(MONOGRAM_LEN).collect::<String>().to_uppercase();
            vec![Placement {
                text: initials,
                position: Point::ORIGIN,
                rotation_deg: 0.0,
                font_size: height * MONOGRAM_SCALE,
            }]
        },
        LayoutMode::Stacked => text
            .chars()
            .enumerate()
            .map(|(i, ch)| Placement {
                text: ch.to_string(),
                position: Point::new(0.0, -(i as f64) * height * STACK_LEADING),
                rotation_deg: 0.0,
                font_size: height,
            })
            .collect(),
        LayoutMode::Arched => ring(text, height, PI, arc),
        LayoutMode::Circular => ring(text, height, TAU, arc),
    }
}

/// Places one character per step along an arc of `arc_rad` radians,
/// centered on the positive X axis.
fn ring(text: &str, height: f64, arc_rad: f64, profile: ArcProfile) -> Vec<Placement> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let radius = profile.radius(height, n);
    let start = -arc_rad / 2.0;
    // The n=1 guard only clamps the step; a lone character still sits at
    // the start of the arc, not its midpoint.
    let step = arc_rad / n.saturating_sub(1).max(1) as f64;

    chars
        .into_iter()
        .enumerate()
        .map(|(i, ch)| {
            let angle = start + i as f64 * step;
            Placement {
                text: ch.to_string(),
                position: Point::new(radius * angle.cos(), radius * angle.sin()),
                // +90 so the glyph's up direction is tangent to the arc,
                // facing outward
                rotation_deg: angle.to_degrees() + 90.0,
                font_size: height,
            }
        })
        .collect()
}
