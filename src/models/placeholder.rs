use serde::{Deserialize, Serialize};

/// A region reserved for content the caller adds after conversion (charts,
/// native media). Purely positional, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}
