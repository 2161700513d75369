//! Shape descriptors shared by both emitters
//!
//! Everything here is plain declarative data in template-local units with
//! the Y axis growing upward. No drawing happens in this module: each
//! emitter walks these descriptors and applies its own unit-to-device
//! conversion and styling.

/// A point in layout or template-local units. Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawable shape, independent of any emitter.
///
/// Rectangles and polygons both travel as closed polylines, which is how
/// the vector document represents them anyway.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline { points: Vec<Point>, closed: bool },
    Circle { center: Point, radius: f64 },
    Line { start: Point, end: Point },
    /// Circular arc, counter-clockwise from `start_deg` to `end_deg`.
    Arc {
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
    },
}

/// Style class attached to each decorative primitive.
///
/// Each emitter maps a tag to its own device styling: the vector path
/// picks an ACI color index, the raster path picks an RGB color and
/// whether the shape is filled or stroked. The geometry itself never
/// changes between emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Bordering frame around the design
    Border,
    /// Sun disc above the farm frame
    Sun,
    /// Large gear ring
    Ring,
    /// Small gear teeth around the ring
    Tooth,
    /// Tent triangle
    Tent,
    /// Campfire disc
    Ember,
    /// Stonework: heritage arch and columns
    Stone,
}

/// A decorative shape plus the style class it renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePrimitive {
    pub shape: Primitive,
    pub style: StyleTag,
}

impl TemplatePrimitive {
    pub fn new(shape: Primitive, style: StyleTag) -> Self {
        Self { shape, style }
    }
}
