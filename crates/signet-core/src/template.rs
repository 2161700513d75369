//! Built-in decorative templates
//!
//! Each template is a fixed list of [`TemplatePrimitive`] values in
//! template-local units, where one unit maps to one drawing unit in the
//! vector document. The raster path multiplies by the request's zoom
//! scale instead. Resolution is a pure lookup over immutable data.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Primitive, StyleTag, TemplatePrimitive};

/// The four built-in decorative overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    /// Bordering rectangle with a sun disc above it
    Farm,
    /// Gear-like ring: one large circle plus twelve small ones
    Workshop,
    /// Tent triangle with a campfire disc below
    Camping,
    /// Half-circle arch flanked by two columns
    Heritage,
}

impl TemplateId {
    /// Parses the wire name of a template. `"none"`, empty, and unknown
    /// names all resolve to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "farm" => Some(Self::Farm),
            "workshop" => Some(Self::Workshop),
            "camping" => Some(Self::Camping),
            "heritage" => Some(Self::Heritage),
            "" | "none" => None,
            other => {
                log::debug!("unknown template {other:?}, rendering without one");
                None
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::Workshop => "workshop",
            Self::Camping => "camping",
            Self::Heritage => "heritage",
        }
    }

    /// The fixed primitive list for this template.
    pub fn primitives(self) -> Vec<TemplatePrimitive> {
        match self {
            Self::Farm => farm(),
            Self::Workshop => workshop(),
            Self::Camping => camping(),
            Self::Heritage => heritage(),
        }
    }
}

/// Resolves an optional template to its primitives. `None` yields an
/// empty sequence.
pub fn resolve(id: Option<TemplateId>) -> Vec<TemplatePrimitive> {
    id.map(TemplateId::primitives).unwrap_or_default()
}

fn farm() -> Vec<TemplatePrimitive> {
    vec![
        TemplatePrimitive::new(
            Primitive::Polyline {
                points: vec![
                    Point::new(-100.0, -50.0),
                    Point::new(100.0, -50.0),
                    Point::new(100.0, 50.0),
                    Point::new(-100.0, 50.0),
                ],
                closed: true,
            },
            StyleTag::Border,
        ),
        TemplatePrimitive::new(
            Primitive::Circle {
                center: Point::new(0.0, 60.0),
                radius: 15.0,
            },
            StyleTag::Sun,
        ),
    ]
}

fn workshop() -> Vec<TemplatePrimitive> {
    let mut primitives = vec![TemplatePrimitive::new(
        Primitive::Circle {
            center: Point::ORIGIN,
            radius: 80.0,
        },
        StyleTag::Ring,
    )];
    for i in 0..12 {
        let angle = (f64::from(i) * 30.0).to_radians();
        primitives.push(TemplatePrimitive::new(
            Primitive::Circle {
                center: Point::new(90.0 * angle.cos(), 90.0 * angle.sin()),
                radius: 5.0,
            },
            StyleTag::Tooth,
        ));
    }
    primitives
}

fn camping() -> Vec<TemplatePrimitive> {
    vec![
        TemplatePrimitive::new(
            Primitive::Polyline {
                points: vec![
                    Point::new(-50.0, -50.0),
                    Point::new(0.0, 50.0),
                    Point::new(50.0, -50.0),
                ],
                closed: true,
            },
            StyleTag::Tent,
        ),
        TemplatePrimitive::new(
            Primitive::Circle {
                center: Point::new(0.0, -60.0),
                radius: 10.0,
            },
            StyleTag::Ember,
        ),
    ]
}

fn heritage() -> Vec<TemplatePrimitive> {
    vec![
        TemplatePrimitive::new(
            Primitive::Arc {
                center: Point::ORIGIN,
                radius: 100.0,
                start_deg: 0.0,
                end_deg: 180.0,
            },
            StyleTag::Stone,
        ),
        TemplatePrimitive::new(
            Primitive::Line {
                start: Point::new(-80.0, -50.0),
                end: Point::new(-80.0, 50.0),
            },
            StyleTag::Stone,
        ),
        TemplatePrimitive::new(
            Primitive::Line {
                start: Point::new(80.0, -50.0),
                end: Point::new(80.0, 50.0),
            },
            StyleTag::Stone,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workshop_is_thirteen_circles() {
        let primitives = resolve(Some(TemplateId::Workshop));
        assert_eq!(primitives.len(), 13);
        assert!(primitives
            .iter()
            .all(|p| matches!(p.shape, Primitive::Circle { .. })));

        // Teeth sit on a 90-unit ring.
        for tooth in primitives.iter().filter(|p| p.style == StyleTag::Tooth) {
            let Primitive::Circle { center, radius } = &tooth.shape else {
                unreachable!();
            };
            assert!((center.x.hypot(center.y) - 90.0).abs() < 1e-9);
            assert_eq!(*radius, 5.0);
        }
    }

    #[test]
    fn farm_is_a_closed_border_and_a_sun() {
        let primitives = resolve(Some(TemplateId::Farm));
        assert_eq!(primitives.len(), 2);
        assert!(matches!(
            &primitives[0].shape,
            Primitive::Polyline { points, closed: true } if points.len() == 4
        ));
        assert_eq!(primitives[1].style, StyleTag::Sun);
    }

    #[test]
    fn heritage_arch_spans_half_a_turn() {
        let primitives = resolve(Some(TemplateId::Heritage));
        assert_eq!(primitives.len(), 3);
        assert!(matches!(
            primitives[0].shape,
            Primitive::Arc { start_deg, end_deg, .. } if start_deg == 0.0 && end_deg == 180.0
        ));
        assert!(primitives.iter().all(|p| p.style == StyleTag::Stone));
    }

    #[test]
    fn resolution_is_a_pure_lookup() {
        assert_eq!(
            resolve(Some(TemplateId::Camping)),
            resolve(Some(TemplateId::Camping))
        );
        assert!(resolve(None).is_empty());
    }

    #[test]
    fn none_and_unknown_names_resolve_to_nothing() {
        assert_eq!(TemplateId::from_name("none"), None);
        assert_eq!(TemplateId::from_name("castle"), None);
        assert_eq!(TemplateId::from_name("Workshop"), Some(TemplateId::Workshop));
    }
}
