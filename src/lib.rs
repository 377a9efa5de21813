//! Procedural PWA icon generator: a purple gradient square with rounded
//! corners and a white store glyph, written as PNG at every standard size.

pub mod icon_gen;
pub mod manifest;
pub mod raster;
