//! Layout validation. Every check returns messages; the [`gate`] decides
//! whether the conversion may produce output.

pub mod dimensions;
pub mod gate;
pub mod position;

pub use gate::{ValidationGate, Verdict};
