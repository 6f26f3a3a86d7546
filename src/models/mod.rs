//! The slide graph: what a conversion produces and a presentation file
//! writer consumes. Geometry is stored in EMU.

pub mod colors;
pub mod common;
pub mod elements;
pub mod image;
pub mod line;
pub mod page;
pub mod placeholder;
pub mod presentation;
pub mod properties;
pub mod shape;
pub mod shape_properties;
pub mod table;
pub mod text;
