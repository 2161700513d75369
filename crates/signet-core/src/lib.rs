//! Signet Core: one layout, two outputs
//!
//! A design request enters as text plus style parameters and leaves as an
//! ordered sequence of placement units. Everything downstream consumes
//! those same units:
//!
//! 1. **Layout** - text becomes positioned, rotated placement units
//! 2. **Templates** - a named overlay resolves to declarative shapes
//! 3. **Vector emit** - placements and shapes become a DXF drawing
//! 4. **Raster emit** - the same placements and shapes become a PNG preview
//!
//! The two emitters live in `signet-export` and never share mutable
//! state; this crate holds the pure parts they agree on. Keeping the
//! placement math and the template catalog in one place is what keeps the
//! fabrication file and the on-screen preview geometrically consistent.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod template;

use serde::{Deserialize, Serialize};

pub use error::{ExportError, FontLoadError, RenderError, Result, SignetError};
pub use geometry::{Point, Primitive, StyleTag, TemplatePrimitive};
pub use layout::{layout, ArcProfile, LayoutMode, Placement};
pub use template::TemplateId;

/// Everything a single design request carries.
///
/// `scale`, `watermark`, `width_px`, and `height_px` only affect the
/// raster preview; the vector path ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Input text. Trimmed before layout; empty input yields empty output.
    pub text: String,
    pub mode: LayoutMode,
    /// Glyph size in layout units. Must be positive.
    pub height: f64,
    /// Requested font family, if any
    pub font: Option<String>,
    pub template: Option<TemplateId>,
    /// Preview zoom multiplier. Must be positive.
    pub scale: f64,
    /// Composite a translucent label onto the preview
    pub watermark: bool,
    /// Preview canvas width in pixels
    pub width_px: u32,
    /// Preview canvas height in pixels
    pub height_px: u32,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            mode: LayoutMode::Straight,
            height: 20.0,
            font: None,
            template: None,
            scale: 1.0,
            watermark: false,
            width_px: 1200,
            height_px: 600,
        }
    }
}
