//! Vector emitter: where placements become a DXF drawing
//!
//! Builds a minimal DXF document (AC1024 header plus an ENTITIES
//! section): one TEXT entity per placement unit, and one drawing entity
//! per template primitive, tagged with the style's ACI color index.
//!
//! Template primitives are emitted at their catalog reference size; the
//! request's preview zoom does not reach this path. The whole document is
//! assembled in memory, then returned as a single buffer.

use signet_core::geometry::{Point, Primitive, StyleTag, TemplatePrimitive};
use signet_core::layout::Placement;

/// ACI color index a style tag maps to in the drawing.
fn color_index(tag: StyleTag) -> u8 {
    match tag {
        StyleTag::Border => 2,
        StyleTag::Sun => 3,
        StyleTag::Ring => 1,
        StyleTag::Tooth => 4,
        StyleTag::Tent => 6,
        StyleTag::Ember => 1,
        StyleTag::Stone => 7,
    }
}

/// Minimal DXF document builder.
///
/// Accumulates entity records as group-code/value pairs and wraps them in
/// the header and section scaffolding at serialization time.
pub struct DxfDocument {
    entities: String,
}

impl DxfDocument {
    pub fn new() -> Self {
        Self {
            entities: String::new(),
        }
    }

    fn tag(&mut self, code: i32, value: &str) {
        self.entities.push_str(&format!("{code}\n{value}\n"));
    }

    fn num(&mut self, code: i32, value: f64) {
        self.entities.push_str(&format!("{code}\n{value}\n"));
    }

    /// One TEXT entity. `style` is the DXF text style name; rotation is
    /// omitted when zero, which is every non-arc mode.
    pub fn add_text(
        &mut self,
        text: &str,
        position: Point,
        height: f64,
        rotation_deg: f64,
        style: Option<&str>,
    ) {
        self.tag(0, "TEXT");
        self.tag(8, "0");
        if let Some(style) = style {
            self.tag(7, style);
        }
        self.num(10, position.x);
        self.num(20, position.y);
        self.num(30, 0.0);
        self.num(40, height);
        self.tag(1, text);
        if rotation_deg != 0.0 {
            self.num(50, rotation_deg);
        }
    }

    pub fn add_circle(&mut self, center: Point, radius: f64, color: u8) {
        self.tag(0, "CIRCLE");
        self.tag(8, "0");
        self.tag(62, &color.to_string());
        self.num(10, center.x);
        self.num(20, center.y);
        self.num(30, 0.0);
        self.num(40, radius);
    }

    pub fn add_line(&mut self, start: Point, end: Point, color: u8) {
        self.tag(0, "LINE");
        self.tag(8, "0");
        self.tag(62, &color.to_string());
        self.num(10, start.x);
        self.num(20, start.y);
        self.num(30, 0.0);
        self.num(11, end.x);
        self.num(21, end.y);
        self.num(31, 0.0);
    }

    pub fn add_arc(&mut self, center: Point, radius: f64, start_deg: f64, end_deg: f64, color: u8) {
        self.tag(0, "ARC");
        self.tag(8, "0");
        self.tag(62, &color.to_string());
        self.num(10, center.x);
        self.num(20, center.y);
        self.num(30, 0.0);
        self.num(40, radius);
        self.num(50, start_deg);
        self.num(51, end_deg);
    }

    pub fn add_polyline(&mut self, points: &[Point], closed: bool, color: u8) {
        self.tag(0, "LWPOLYLINE");
        self.tag(8, "0");
        self.tag(62, &color.to_string());
        self.tag(90, &points.len().to_string());
        self.tag(70, if closed { "1" } else { "0" });
        for point in points {
            self.num(10, point.x);
            self.num(20, point.y);
        }
    }

    /// Wraps the accumulated entities in the document scaffolding and
    /// serializes the whole drawing at once.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut doc = String::new();
        doc.push_str("0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1024\n0\nENDSEC\n");
        doc.push_str("0\nSECTION\n2\nENTITIES\n");
        doc.push_str(&self.entities);
        doc.push_str("0\nENDSEC\n0\nEOF\n");
        doc.into_bytes()
    }
}

impl Default for DxfDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles the full drawing for a set of placements and template
/// primitives. `font` becomes the TEXT style name when present; glyph
/// data is never loaded on this path.
pub fn emit_vector(
    placements: &[Placement],
    primitives: &[TemplatePrimitive],
    font: Option<&str>,
) -> Vec<u8> {
    log::debug!(
        "emitting vector document: {} text units, {} template primitives",
        placements.len(),
        primitives.len()
    );

    let mut doc = DxfDocument::new();

    for placement in placements {
        doc.add_text(
            &placement.text,
            placement.position,
            placement.font_size,
            placement.rotation_deg,
            font,
        );
    }

    for primitive in primitives {
        let color = color_index(primitive.style);
        match &primitive.shape {
            Primitive::Polyline { points, closed } => doc.add_polyline(points, *closed, color),
            Primitive::Circle { center, radius } => doc.add_circle(*center, *radius, color),
            Primitive::Line { start, end } => doc.add_line(*start, *end, color),
            Primitive::Arc {
                center,
                radius,
                start_deg,
                end_deg,
            } => doc.add_arc(*center, *radius, *start_deg, *end_deg, color),
        }
    }

    doc.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_core::layout::{layout, ArcProfile, LayoutMode};
    use signet_core::template::{self, TemplateId};

    fn emit_str(placements: &[Placement], primitives: &[TemplatePrimitive]) -> String {
        String::from_utf8(emit_vector(placements, primitives, None)).unwrap()
    }

    #[test]
    fn straight_text_entity_has_height_and_content() {
        let placements = layout("HELLO", LayoutMode::Straight, 20.0, ArcProfile::VECTOR);
        let doc = emit_str(&placements, &[]);
        assert!(doc.contains("0\nTEXT\n"));
        assert!(doc.contains("40\n20\n"));
        assert!(doc.contains("1\nHELLO\n"));
        // Rotation is omitted for non-arc modes.
        assert!(!doc.contains("\n50\n"));
        assert!(doc.ends_with("0\nENDSEC\n0\nEOF\n"));
    }

    #[test]
    fn arc_text_entities_carry_rotation() {
        let placements = layout("RING", LayoutMode::Circular, 20.0, ArcProfile::VECTOR);
        let doc = emit_str(&placements, &[]);
        assert_eq!(doc.matches("0\nTEXT\n").count(), 4);
        assert!(doc.contains("50\n"));
    }

    #[test]
    fn requested_font_becomes_the_text_style() {
        let placements = layout("HI", LayoutMode::Straight, 20.0, ArcProfile::VECTOR);
        let doc =
            String::from_utf8(emit_vector(&placements, &[], Some("DejaVu Sans"))).unwrap();
        assert!(doc.contains("7\nDejaVu Sans\n"));
    }

    #[test]
    fn workshop_template_emits_thirteen_circles() {
        let primitives = template::resolve(Some(TemplateId::Workshop));
        let doc = emit_str(&[], &primitives);
        assert_eq!(doc.matches("0\nCIRCLE\n").count(), 13);
    }

    #[test]
    fn farm_border_is_a_closed_polyline() {
        let primitives = template::resolve(Some(TemplateId::Farm));
        let doc = emit_str(&[], &primitives);
        assert!(doc.contains("0\nLWPOLYLINE\n"));
        assert!(doc.contains("90\n4\n"));
        assert!(doc.contains("70\n1\n"));
        assert!(doc.contains("62\n2\n"));
    }

    #[test]
    fn heritage_template_has_arc_and_columns() {
        let primitives = template::resolve(Some(TemplateId::Heritage));
        let doc = emit_str(&[], &primitives);
        assert_eq!(doc.matches("0\nARC\n").count(), 1);
        assert_eq!(doc.matches("0\nLINE\n").count(), 2);
        assert!(doc.contains("50\n0\n"));
        assert!(doc.contains("51\n180\n"));
    }

    #[test]
    fn identical_requests_produce_identical_documents() {
        let placements = layout("SIGNET", LayoutMode::Arched, 20.0, ArcProfile::VECTOR);
        let primitives = template::resolve(Some(TemplateId::Camping));
        let a = emit_vector(&placements, &primitives, None);
        let b = emit_vector(&placements, &primitives, None);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_placements_still_produce_a_valid_document() {
        let doc = emit_str(&[], &[]);
        assert!(doc.starts_with("0\nSECTION\n2\nHEADER\n"));
        assert!(doc.ends_with("0\nEOF\n"));
    }
}
