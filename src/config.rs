//! Per-conversion configuration. Values are threaded explicitly through the
//! pipeline; there is no process-wide theme or option state.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::colors::RgbColor;

/// Environment variable overriding [`ConvertOptions::tmp_dir`].
pub const TMP_DIR_ENV: &str = "HTML2PPTX_TMP_DIR";
/// Environment variable enabling [`DebugMode`] (honored on macOS only).
pub const DEBUG_ENV: &str = "HTML2PPTX_DEBUG";
/// Sentinel value of [`DEBUG_ENV`] that pauses at every checkpoint.
pub const DEBUG_ALWAYS: &str = "always";

/// Developer inspection hook: pause the browser page at validation checkpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DebugMode {
    #[default]
    Off,
    /// Pause only at checkpoints that found errors.
    OnError,
    /// Pause at every checkpoint.
    Always,
}

impl DebugMode {
    /// Interprets a raw environment value. Empty, `0` and `false` mean off.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => DebugMode::Off,
            Some(value) if value.is_empty() => DebugMode::Off,
            Some(value) if value == "0" || value.eq_ignore_ascii_case("false") => DebugMode::Off,
            Some(value) if value.eq_ignore_ascii_case(DEBUG_ALWAYS) => DebugMode::Always,
            Some(_) => DebugMode::OnError,
        }
    }

    /// Reads [`DEBUG_ENV`]. The toggle is only checked on macOS hosts.
    pub fn from_env() -> Self {
        if cfg!(target_os = "macos") {
            DebugMode::parse(env::var(DEBUG_ENV).ok().as_deref())
        } else {
            DebugMode::Off
        }
    }

    pub fn should_pause(self, has_errors: bool) -> bool {
        match self {
            DebugMode::Off => false,
            DebugMode::OnError => has_errors,
            DebugMode::Always => true,
        }
    }
}

/// Upper bounds for each kind of browser round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub navigation: Duration,
    pub evaluation: Duration,
    pub screenshot: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(30),
            evaluation: Duration::from_secs(10),
            screenshot: Duration::from_secs(20),
        }
    }
}

/// Fill/text colors for one class of table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellColors {
    pub fill: RgbColor,
    pub color: RgbColor,
    pub bold: bool,
}

/// Colors the slide builder falls back to when the page did not specify them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub table_header: CellColors,
    pub table_label: CellColors,
    pub table_data: CellColors,
    pub table_border: RgbColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            table_header: CellColors {
                fill: RgbColor::new(0x1F, 0x4E, 0x79),
                color: RgbColor::WHITE,
                bold: true,
            },
            table_label: CellColors {
                fill: RgbColor::new(0xDE, 0xEA, 0xF6),
                color: RgbColor::new(0x1F, 0x1F, 0x1F),
                bold: true,
            },
            table_data: CellColors {
                fill: RgbColor::WHITE,
                color: RgbColor::new(0x33, 0x33, 0x33),
                bold: false,
            },
            table_border: RgbColor::new(0xBF, 0xBF, 0xBF),
        }
    }
}

/// Options for one HTML → slide conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving rasterized images and debug artifacts.
    pub tmp_dir: PathBuf,
    /// Index of an existing slide to draw into. `None` appends a new slide.
    pub slide: Option<usize>,
    pub timeouts: Timeouts,
    pub debug: DebugMode,
    pub theme: Theme,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            tmp_dir: env::temp_dir(),
            slide: None,
            timeouts: Timeouts::default(),
            debug: DebugMode::Off,
            theme: Theme::default(),
        }
    }
}

impl ConvertOptions {
    /// Defaults overridden by [`TMP_DIR_ENV`] and [`DEBUG_ENV`].
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(dir) = env::var(TMP_DIR_ENV) {
            if !dir.trim().is_empty() {
                options.tmp_dir = PathBuf::from(dir);
            }
        }
        options.debug = DebugMode::from_env();
        options
    }

    pub fn with_tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = dir.into();
        self
    }

    pub fn with_slide(mut self, index: usize) -> Self {
        self.slide = Some(index);
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
