//! Output sinks for computed flux surfaces.
//!
//! Every sink writes to a temporary sibling file and renames it over the
//! target only after the encoder has finished, so a failed run never
//! leaves a truncated file at the requested path.

pub mod atomic;
pub mod export;
pub mod glyphs;
pub mod render;
