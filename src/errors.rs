use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Validation failures collected across every check of one conversion.
/// Always non-empty when constructed by the validation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            many => {
                write!(f, "Multiple validation errors found:")?;
                for (index, message) in many.iter().enumerate() {
                    write!(f, "\n  {}. {}", index + 1, message)?;
                }
                Ok(())
            }
        }
    }
}

/// Represents errors that can occur while converting an HTML slide.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// No usable browser could be started (missing executable, bad launch flags).
    #[error("Browser unavailable: {0}")]
    BrowserUnavailable(String),

    /// The bundled stylesheet, helper script or its init hook could not be installed.
    #[error("Failed to inject {what} into page: {message}")]
    Injection { what: &'static str, message: String },

    /// The page could not be loaded.
    #[error("Failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    /// An in-page helper call returned something other than what was asked for.
    #[error("Page helper `{method}` failed: {message}")]
    Rpc { method: String, message: String },

    /// A browser operation did not finish within its configured limit.
    #[error("Timed out after {seconds}s while {operation}")]
    Timeout { operation: String, seconds: u64 },

    /// The element marked for rasterization is no longer in the page.
    #[error("Cannot rasterize {kind} element {id}: element not found in page")]
    RasterTargetMissing { kind: String, id: String },

    /// Capturing the isolated element failed.
    #[error("Failed to rasterize {kind} element {id}: {message}")]
    RasterCapture {
        kind: String,
        id: String,
        message: String,
    },

    /// A rasterized element reached the slide builder without an image.
    #[error("Rasterized {kind} element {id} has no image source")]
    MissingRasterSource { kind: String, id: String },

    /// A CSS gradient could not be turned into an image.
    #[error("Unsupported gradient `{0}`")]
    Gradient(String),

    /// The requested target slide does not exist.
    #[error("Invalid slide: {0}")]
    InvalidSlide(String),

    /// One or more layout validation checks failed.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Any other error, tagged with the HTML file it came from.
    #[error("{}", prefixed(.path, .source))]
    InFile {
        path: PathBuf,
        source: Box<ConversionError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Error from the Chrome DevTools Protocol client.
    #[cfg(feature = "chromium")]
    #[error("Browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

fn prefixed(path: &Path, source: &ConversionError) -> String {
    let message = source.to_string();
    let shown = path.display().to_string();
    if message.contains(&shown) {
        message
    } else {
        format!("{shown}: {message}")
    }
}

impl ConversionError {
    /// Attaches the originating file path unless it is already attached.
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            already @ ConversionError::InFile { .. } => already,
            other => ConversionError::InFile {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the validation messages if this is (or wraps) a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ConversionError::Validation(errors) => Some(errors),
            ConversionError::InFile { source, .. } => source.validation_errors(),
            _ => None,
        }
    }
}

/// A type alias for `Result<T, ConversionError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_validation_error_is_shown_verbatim() {
        let errors = ValidationErrors(vec!["HTML content overflows body".to_string()]);
        assert_eq!(errors.to_string(), "HTML content overflows body");
    }

    #[test]
    fn multiple_validation_errors_are_numbered() {
        let errors = ValidationErrors(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(
            errors.to_string(),
            "Multiple validation errors found:\n  1. first\n  2. second"
        );
    }

    #[test]
    fn file_path_is_prefixed_once() {
        let path = Path::new("/tmp/slide1.html");
        let err = ConversionError::Validation(ValidationErrors(vec!["bad".into()]))
            .in_file(path)
            .in_file(path);
        assert_eq!(err.to_string(), "/tmp/slide1.html: bad");
        assert!(err.validation_errors().is_some());

        let mentions_path = ConversionError::Navigation {
            url: "file:///tmp/slide1.html".into(),
            message: "net::ERR_FILE_NOT_FOUND".into(),
        }
        .in_file(path);
        assert_eq!(
            mentions_path.to_string(),
            "Failed to load file:///tmp/slide1.html: net::ERR_FILE_NOT_FOUND"
        );
    }
}
