//! Font discovery and fallback for the preview renderer
//!
//! The raster path needs real glyph data; the vector path only names a
//! font. Resolution walks an explicit ladder: the requested family, then
//! the platform default, then an embedded 8x8 bitmap face that ships with
//! the binary. The ladder always produces a usable handle, so callers
//! never deal with a missing font.
//!
//! Construct the resolver once at process start: scanning system fonts is
//! the only expensive step, and the resolver is immutable afterwards.

use std::sync::Arc;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use fontdb::{Database, Family, Query};

use signet_core::error::{FontLoadError, Result};

#[cfg(target_os = "windows")]
const PLATFORM_DEFAULT_FAMILY: &str = "Arial";
#[cfg(target_os = "macos")]
const PLATFORM_DEFAULT_FAMILY: &str = "Helvetica";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const PLATFORM_DEFAULT_FAMILY: &str = "DejaVu Sans";

/// A loaded outline font: raw bytes plus the face index inside them.
///
/// The bytes are validated at construction so downstream glyph extraction
/// can assume a parseable face.
pub struct OutlineFont {
    data: Vec<u8>,
    index: u32,
}

impl OutlineFont {
    /// Validates `data` and wraps it. Fails on bytes skrifa cannot parse.
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self> {
        skrifa::FontRef::from_index(&data, index).map_err(|_| FontLoadError::InvalidData)?;
        Ok(Self { data, index })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// The handle the raster path draws with.
#[derive(Clone)]
pub enum FontHandle {
    /// A real outline font discovered on this machine
    Outline(Arc<OutlineFont>),
    /// The embedded 8x8 bitmap face
    Builtin,
}

/// Which rung of the fallback ladder produced a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontOrigin {
    Requested,
    PlatformDefault,
    Builtin,
}

/// A resolved font plus where it came from.
pub struct ResolvedFont {
    pub handle: FontHandle,
    pub origin: FontOrigin,
}

/// Looks up the 8x8 bitmap rows for `ch` in the embedded face.
///
/// Covers printable ASCII and a handful of extras; anything else returns
/// `None` and the renderer skips the cell.
pub fn builtin_glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch)
}

/// Resolves requested font names to usable handles.
pub struct FontResolver {
    db: Database,
}

impl FontResolver {
    /// Resolver with no installed fonts: every lookup lands on the
    /// embedded face. Deterministic across machines, which is what tests
    /// want.
    pub fn new() -> Self {
        Self { db: Database::new() }
    }

    /// Resolver backed by the fonts installed on this machine. Scans the
    /// system font directories once.
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("font database loaded {} faces", db.len());
        Self { db }
    }

    /// Resolves `requested` through the fallback ladder: the requested
    /// family, then the platform default, then the embedded face. Never
    /// fails.
    pub fn resolve(&self, requested: Option<&str>) -> ResolvedFont {
        let ladder = [
            (requested, FontOrigin::Requested),
            (Some(PLATFORM_DEFAULT_FAMILY), FontOrigin::PlatformDefault),
        ];

        for (family, origin) in ladder {
            let Some(family) = family else { continue };
            match self.load_family(family) {
                Some(font) => {
                    return ResolvedFont {
                        handle: FontHandle::Outline(Arc::new(font)),
                        origin,
                    }
                },
                None => log::debug!("font family {family:?} not usable, trying next fallback"),
            }
        }

        ResolvedFont {
            handle: FontHandle::Builtin,
            origin: FontOrigin::Builtin,
        }
    }

    fn load_family(&self, family: &str) -> Option<OutlineFont> {
        let query = Query {
            families: &[Family::Name(family)],
            ..Query::default()
        };
        let id = self.db.query(&query)?;
        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;
        OutlineFont::from_data(data, index).ok()
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resolver_falls_through_to_the_builtin_face() {
        let resolver = FontResolver::new();
        let resolved = resolver.resolve(Some("No Such Family"));
        assert_eq!(resolved.origin, FontOrigin::Builtin);
        assert!(matches!(resolved.handle, FontHandle::Builtin));
    }

    #[test]
    fn no_request_still_resolves() {
        let resolver = FontResolver::new();
        let resolved = resolver.resolve(None);
        assert_eq!(resolved.origin, FontOrigin::Builtin);
    }

    #[test]
    fn builtin_face_covers_ascii() {
        assert!(builtin_glyph('A').is_some());
        assert!(builtin_glyph('z').is_some());
        assert!(builtin_glyph('0').is_some());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = OutlineFont::from_data(vec![0u8; 64], 0);
        assert!(result.is_err());
    }
}
