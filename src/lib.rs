pub mod builder;
pub mod config;
pub mod convert;
pub mod errors;
pub mod extract;
pub mod models;
pub mod page;
pub mod raster;
pub mod units;
pub mod validate;

pub use config::{ConvertOptions, DebugMode, Theme, Timeouts};
pub use convert::{convert_file, html_to_slide, Conversion};
pub use errors::{ConversionError, Result, ValidationErrors};
pub use models::presentation::{PresLayout, Presentation};
pub use page::{BrowserLauncher, PageDriver};

// features
#[cfg(feature = "chromium")]
pub use page::chromium::{ChromiumLauncher, ChromiumPage};
