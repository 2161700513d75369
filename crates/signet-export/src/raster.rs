//! Raster emitter: the same design as pixels
//!
//! Renders placement units and template primitives onto a fixed-size
//! canvas with a centered, Y-up coordinate system so the preview lines up
//! visually with the vector drawing. Text becomes outline paths (skrifa
//! glyphs for real fonts, scaled cells for the embedded face), templates
//! become filled or stroked shapes, and the finished canvas is flattened
//! to opaque RGB and encoded as PNG.
//!
//! Unlike the vector path, template primitives here are scaled by the
//! request's zoom factor.

use kurbo::{Affine, BezPath, PathEl, Shape, Vec2};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::MetadataProvider;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use signet_core::error::{ExportError, RenderError, Result};
use signet_core::geometry::{Point, Primitive, StyleTag, TemplatePrimitive};
use signet_core::layout::Placement;
use signet_core::LayoutRequest;
use signet_fontdb::{builtin_glyph, FontHandle, OutlineFont};

/// Preview text never drops below this pixel size.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Stroke width for outlined template shapes, multiplied by the zoom
/// scale.
const TEMPLATE_STROKE_WIDTH: f64 = 2.0;

const WATERMARK_TEXT: &str = "DEMO";
const WATERMARK_SIZE: f64 = 40.0;
const WATERMARK_MARGIN: f64 = 20.0;
/// ~39% opacity
const WATERMARK_ALPHA: u8 = 100;
const WATERMARK_INK: (u8, u8, u8) = (60, 60, 60);

/// Curve flattening tolerance for circles and arcs.
const CURVE_TOLERANCE: f64 = 0.1;

/// RGB color a style tag maps to on the canvas.
fn style_rgb(tag: StyleTag) -> (u8, u8, u8) {
    match tag {
        StyleTag::Border => (0xc7, 0xa2, 0x52),
        StyleTag::Sun => (0xf6, 0xc8, 0x5f),
        StyleTag::Ring | StyleTag::Tooth => (0x8a, 0xa9, 0xcf),
        StyleTag::Tent => (0x6f, 0xbf, 0x73),
        StyleTag::Ember => (0xe8, 0x6e, 0x3b),
        StyleTag::Stone => (0xc9, 0xc9, 0xc9),
    }
}

/// Whether a style tag fills its shape; everything else is stroked.
fn style_filled(tag: StyleTag) -> bool {
    matches!(tag, StyleTag::Sun | StyleTag::Tooth | StyleTag::Ember)
}

/// Renders the preview for a set of placements and template primitives.
///
/// Placements arrive already in device units (the caller lays out at
/// preview size); `request` supplies the canvas dimensions, zoom scale
/// for templates, and the watermark flag. Returns finished PNG bytes.
pub fn emit_raster(
    placements: &[Placement],
    primitives: &[TemplatePrimitive],
    request: &LayoutRequest,
    font: &FontHandle,
) -> Result<Vec<u8>> {
    let (width, height) = (request.width_px, request.height_px);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height }.into());
    }

    log::debug!(
        "emitting {width}x{height} preview: {} text units, {} template primitives",
        placements.len(),
        primitives.len()
    );

    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed)?;
    pixmap.fill(tiny_skia::Color::from_rgba8(255, 255, 255, 255));

    // Centered, Y-up canvas coordinates, matching the vector convention.
    let to_device = Affine::new([
        1.0,
        0.0,
        0.0,
        -1.0,
        f64::from(width) / 2.0,
        f64::from(height) / 2.0,
    ]);

    for primitive in primitives {
        draw_primitive(&mut pixmap, primitive, request.scale, to_device)?;
    }

    for placement in placements {
        draw_placement(&mut pixmap, font, placement, to_device)?;
    }

    if request.watermark {
        draw_watermark(&mut pixmap, font, request.scale)?;
    }

    encode_png(&pixmap)
}

fn draw_primitive(
    pixmap: &mut Pixmap,
    primitive: &TemplatePrimitive,
    scale: f64,
    to_device: Affine,
) -> Result<()> {
    let mut path = primitive_path(&primitive.shape);
    path.apply_affine(to_device * Affine::scale(scale));

    let (r, g, b) = style_rgb(primitive.style);
    if style_filled(primitive.style) {
        fill(pixmap, &path, r, g, b, 255)
    } else {
        stroke(pixmap, &path, r, g, b, TEMPLATE_STROKE_WIDTH * scale)
    }
}

fn kpoint(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

fn primitive_path(shape: &Primitive) -> BezPath {
    match shape {
        Primitive::Polyline { points, closed } => {
            let mut path = BezPath::new();
            let mut iter = points.iter();
            if let Some(first) = iter.next() {
                path.move_to(kpoint(*first));
                for point in iter {
                    path.line_to(kpoint(*point));
                }
                if *closed {
                    path.close_path();
                }
            }
            path
        },
        Primitive::Circle { center, radius } => {
            kurbo::Circle::new(kpoint(*center), *radius).to_path(CURVE_TOLERANCE)
        },
        Primitive::Line { start, end } => {
            let mut path = BezPath::new();
            path.move_to(kpoint(*start));
            path.line_to(kpoint(*end));
            path
        },
        Primitive::Arc {
            center,
            radius,
            start_deg,
            end_deg,
        } => kurbo::Arc {
            center: kpoint(*center),
            radii: Vec2::new(*radius, *radius),
            start_angle: start_deg.to_radians(),
            sweep_angle: (end_deg - start_deg).to_radians(),
            x_rotation: 0.0,
        }
        .to_path(CURVE_TOLERANCE),
    }
}

fn draw_placement(
    pixmap: &mut Pixmap,
    font: &FontHandle,
    placement: &Placement,
    to_device: Affine,
) -> Result<()> {
    let mut path = text_path(font, &placement.text, placement.font_size)?;
    if path.elements().is_empty() {
        return Ok(());
    }

    let affine = to_device
        * Affine::translate((placement.position.x, placement.position.y))
        * Affine::rotate(placement.rotation_deg.to_radians());
    path.apply_affine(affine);

    fill(pixmap, &path, 0, 0, 0, 255)
}

fn draw_watermark(pixmap: &mut Pixmap, font: &FontHandle, scale: f64) -> Result<()> {
    let mut path = text_path(font, WATERMARK_TEXT, WATERMARK_SIZE * scale)?;
    if path.elements().is_empty() {
        return Ok(());
    }

    // The path is centered on the origin; park its center so the label
    // hugs the bottom-right corner at a fixed margin.
    let bbox = path.bounding_box();
    let cx = f64::from(pixmap.width()) - WATERMARK_MARGIN - bbox.width() / 2.0;
    let cy = f64::from(pixmap.height()) - WATERMARK_MARGIN - bbox.height() / 2.0;
    path.apply_affine(Affine::new([1.0, 0.0, 0.0, -1.0, cx, cy]));

    let (r, g, b) = WATERMARK_INK;
    fill(pixmap, &path, r, g, b, WATERMARK_ALPHA)
}

/// Builds an outline path for `text` at `size`, centered on the origin in
/// Y-up coordinates. Centering on the path's own bounds is what anchors
/// every unit on its placement point in both axes.
fn text_path(font: &FontHandle, text: &str, size: f64) -> Result<BezPath> {
    let path = match font {
        FontHandle::Outline(outline) => outline_text_path(outline, text, size)?,
        FontHandle::Builtin => builtin_text_path(text, size),
    };
    Ok(center_path(path))
}

fn center_path(mut path: BezPath) -> BezPath {
    if path.elements().is_empty() {
        return path;
    }
    let bbox = path.bounding_box();
    path.apply_affine(Affine::translate((
        -(bbox.x0 + bbox.x1) / 2.0,
        -(bbox.y0 + bbox.y1) / 2.0,
    )));
    path
}

/// Feeds skrifa outline callbacks into a kurbo path at a running X
/// offset.
struct PathPen<'a> {
    path: &'a mut BezPath,
    dx: f64,
}

impl OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((self.dx + f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((self.dx + f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(
            (self.dx + f64::from(cx0), f64::from(cy0)),
            (self.dx + f64::from(x), f64::from(y)),
        );
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (self.dx + f64::from(cx0), f64::from(cy0)),
            (self.dx + f64::from(cx1), f64::from(cy1)),
            (self.dx + f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

fn outline_text_path(font: &OutlineFont, text: &str, size: f64) -> Result<BezPath> {
    let font_ref = skrifa::FontRef::from_index(font.data(), font.index())
        .map_err(|_| RenderError::InvalidFont)?;
    let charmap = font_ref.charmap();
    let outlines = font_ref.outline_glyphs();
    let font_size = Size::new(size as f32);
    let metrics = font_ref.glyph_metrics(font_size, LocationRef::default());

    let mut path = BezPath::new();
    let mut dx = 0.0f64;

    for ch in text.chars() {
        let Some(glyph_id) = charmap.map(ch) else {
            // Unmapped character: advance half an em and move on.
            log::trace!("no glyph for {ch:?}, skipping");
            dx += size * 0.5;
            continue;
        };

        if let Some(glyph) = outlines.get(glyph_id) {
            let mut pen = PathPen { path: &mut path, dx };
            let settings = DrawSettings::unhinted(font_size, LocationRef::default());
            glyph
                .draw(settings, &mut pen)
                .map_err(|_| RenderError::OutlineExtractionFailed)?;
        }

        dx += metrics
            .advance_width(glyph_id)
            .map_or(size * 0.5, f64::from);
    }

    Ok(path)
}

/// Cell grid of the embedded face.
const BUILTIN_GRID: u32 = 8;

fn builtin_text_path(text: &str, size: f64) -> BezPath {
    let cell = size / f64::from(BUILTIN_GRID);
    let mut path = BezPath::new();
    let mut dx = 0.0f64;

    for ch in text.chars() {
        if let Some(rows) = builtin_glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..BUILTIN_GRID {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    // Row 0 is the top of the glyph; flip into Y-up.
                    let x0 = dx + f64::from(col) * cell;
                    let y1 = size - row as f64 * cell;
                    path.move_to((x0, y1 - cell));
                    path.line_to((x0 + cell, y1 - cell));
                    path.line_to((x0 + cell, y1));
                    path.line_to((x0, y1));
                    path.close_path();
                }
            }
        }
        dx += size;
    }

    path
}

fn fill(pixmap: &mut Pixmap, path: &BezPath, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
    let path = to_tiny_path(path)?;
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    paint.set_color_rgba8(r, g, b, a);
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    Ok(())
}

fn stroke(pixmap: &mut Pixmap, path: &BezPath, r: u8, g: u8, b: u8, width: f64) -> Result<()> {
    let path = to_tiny_path(path)?;
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    paint.set_color_rgba8(r, g, b, 255);
    let stroke = Stroke {
        width: width as f32,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    Ok(())
}

fn to_tiny_path(path: &BezPath) -> Result<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish().ok_or_else(|| RenderError::PathBuildingFailed.into())
}

/// Flattens the canvas to opaque RGB and encodes PNG bytes.
fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    use image::ImageEncoder;

    let mut rgb = Vec::with_capacity((pixmap.width() * pixmap.height() * 3) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgb.extend_from_slice(&[color.red(), color.green(), color.blue()]);
    }

    let mut out = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut out);
    encoder
        .write_image(
            &rgb,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {e}")))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_core::layout::{layout, ArcProfile, LayoutMode};
    use signet_core::template::{self, TemplateId};

    fn preview_request(text: &str, mode: LayoutMode) -> LayoutRequest {
        LayoutRequest {
            text: text.to_owned(),
            mode,
            height: 40.0,
            width_px: 320,
            height_px: 160,
            ..LayoutRequest::default()
        }
    }

    fn render(request: &LayoutRequest) -> Vec<u8> {
        let size = (request.height * request.scale).max(MIN_FONT_SIZE);
        let placements = layout(&request.text, request.mode, size, ArcProfile::raster(request.scale));
        let primitives = template::resolve(request.template);
        emit_raster(&placements, &primitives, request, &FontHandle::Builtin).unwrap()
    }

    #[test]
    fn preview_is_a_png_with_the_requested_dimensions() {
        let request = preview_request("HI", LayoutMode::Straight);
        let png = render(&request);
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 320);
        assert_eq!(decoded.height(), 160);
    }

    #[test]
    fn output_is_opaque_rgb() {
        let request = preview_request("HI", LayoutMode::Straight);
        let decoded = image::load_from_memory(&render(&request)).unwrap();
        assert!(matches!(decoded, image::DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn text_actually_marks_the_canvas() {
        let request = preview_request("HI", LayoutMode::Straight);
        let decoded = image::load_from_memory(&render(&request)).unwrap().into_rgb8();
        assert!(decoded.pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn identical_requests_produce_identical_previews() {
        let request = preview_request("RING", LayoutMode::Circular);
        assert_eq!(render(&request), render(&request));
    }

    #[test]
    fn watermark_changes_the_output() {
        let plain = preview_request("HI", LayoutMode::Straight);
        let marked = LayoutRequest {
            watermark: true,
            ..plain.clone()
        };
        assert_ne!(render(&plain), render(&marked));
    }

    #[test]
    fn template_shapes_reach_the_canvas() {
        let empty = preview_request("HI", LayoutMode::Straight);
        let templated = LayoutRequest {
            template: Some(TemplateId::Workshop),
            ..empty.clone()
        };
        assert_ne!(render(&empty), render(&templated));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let request = LayoutRequest {
            width_px: 0,
            ..preview_request("HI", LayoutMode::Straight)
        };
        let result = emit_raster(&[], &[], &request, &FontHandle::Builtin);
        assert!(result.is_err());
    }

    #[test]
    fn empty_text_still_renders_a_canvas() {
        let request = preview_request("", LayoutMode::Straight);
        let png = render(&request);
        assert!(image::load_from_memory(&png).is_ok());
    }
}
