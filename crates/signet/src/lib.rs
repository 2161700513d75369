//! Signet: text layout with dual vector/raster output
//!
//! Give the engine a string, a layout mode, and style parameters; get the
//! same design back twice. The vector artifact is a DXF drawing for
//! fabrication and cutting workflows, the raster artifact is a PNG
//! preview for screens. Both are produced from one set of placement
//! units, which is what keeps them geometrically consistent.
//!
//! ```no_run
//! use signet::{Engine, LayoutMode, LayoutRequest, TemplateId};
//!
//! let engine = Engine::new();
//! let request = LayoutRequest {
//!     text: "WORKSHOP".to_owned(),
//!     mode: LayoutMode::Arched,
//!     template: Some(TemplateId::Workshop),
//!     ..LayoutRequest::default()
//! };
//!
//! let drawing = engine.vector_artifact(&request)?;
//! let preview = engine.preview_artifact(&request)?;
//! # signet::Result::Ok(())
//! ```
//!
//! Each call is independent and purely request-scoped; an `Engine` can be
//! shared across worker threads. Writing the returned bytes anywhere
//! (and picking unique destination names) is the caller's job.

pub use signet_core::{
    layout, ArcProfile, ExportError, FontLoadError, LayoutMode, LayoutRequest, Placement, Point,
    Primitive, RenderError, Result, SignetError, StyleTag, TemplateId, TemplatePrimitive,
};
pub use signet_core::template;
pub use signet_export::{emit_raster, emit_vector, MIN_FONT_SIZE};
pub use signet_fontdb::{FontHandle, FontOrigin, FontResolver, ResolvedFont};

/// The engine behind both artifact endpoints.
///
/// Holds the font resolver, which is the only state worth constructing
/// once: scanning system fonts at every request would dominate the actual
/// rendering.
pub struct Engine {
    fonts: FontResolver,
}

impl Engine {
    /// Engine backed by the fonts installed on this machine. Construct
    /// once at process start.
    pub fn new() -> Self {
        Self {
            fonts: FontResolver::with_system_fonts(),
        }
    }

    /// Engine with an explicit resolver. An empty resolver pins every
    /// preview to the embedded face, which keeps output identical across
    /// machines.
    pub fn with_resolver(fonts: FontResolver) -> Self {
        Self { fonts }
    }

    /// Produces the vector drawing for a request.
    ///
    /// Layout runs at the requested glyph height with the fabrication
    /// arc constants; template primitives are emitted at catalog
    /// reference size. The preview-only fields of the request (`scale`,
    /// `watermark`, canvas dimensions) are ignored here.
    pub fn vector_artifact(&self, request: &LayoutRequest) -> Result<Vec<u8>> {
        let placements = layout(
            &request.text,
            request.mode,
            request.height,
            ArcProfile::VECTOR,
        );
        let primitives = template::resolve(request.template);
        Ok(emit_vector(&placements, &primitives, request.font.as_deref()))
    }

    /// Produces the PNG preview for a request.
    ///
    /// Layout runs at preview device size (height x scale, floored at
    /// [`MIN_FONT_SIZE`]) with the preview arc constants, so placements
    /// land in canvas pixels. The font resolves through the fallback
    /// ladder and never fails; rendering errors surface as typed errors.
    pub fn preview_artifact(&self, request: &LayoutRequest) -> Result<Vec<u8>> {
        let size = (request.height * request.scale).max(MIN_FONT_SIZE);
        let placements = layout(
            &request.text,
            request.mode,
            size,
            ArcProfile::raster(request.scale),
        );
        let primitives = template::resolve(request.template);
        let font = self.fonts.resolve(request.font.as_deref());
        emit_raster(&placements, &primitives, request, &font.handle)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
