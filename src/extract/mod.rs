//! DOM extraction. The page returns a [`snapshot::DomSnapshot`]; everything
//! here is pure Rust over that snapshot and never touches the browser.

pub mod css;
pub mod inline;
pub mod list;
pub mod slide_data;
pub mod snapshot;
pub mod table;
pub mod walker;

pub use slide_data::{Background, Element, SlideData};
pub use snapshot::DomSnapshot;
pub use walker::extract_slide_data;
