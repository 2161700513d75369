//! The two Signet emitters
//!
//! Both emitters consume the same placement units and template
//! primitives, and neither knows the other exists:
//!
//! - [`dxf`] assembles a vector drawing document for fabrication tooling
//! - [`raster`] renders a fixed-size PNG preview of the same design
//!
//! Each output is produced fully in memory and handed back as one byte
//! buffer; destination I/O (and making it safely concurrent) belongs to
//! the caller.

pub mod dxf;
pub mod raster;

pub use dxf::emit_vector;
pub use raster::{emit_raster, MIN_FONT_SIZE};
