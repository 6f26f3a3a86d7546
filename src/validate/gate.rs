//! All-or-nothing aggregation of validation errors.

use log::{debug, warn};

use crate::errors::{ConversionError, Result, ValidationErrors};

/// Outcome of a finished gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    Failed(ValidationErrors),
}

impl Verdict {
    pub fn into_result(self) -> Result<()> {
        match self {
            Verdict::Clean => Ok(()),
            Verdict::Failed(errors) => Err(ConversionError::Validation(errors)),
        }
    }
}

/// Collects errors from every check. Consuming it with [`finish`](Self::finish)
/// is the only way out of the collecting state, so a verdict is reached
/// exactly once per conversion.
#[derive(Debug, Default)]
pub struct ValidationGate {
    errors: Vec<String>,
}

impl ValidationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the messages of one check. Returns how many it contributed.
    pub fn record<I>(&mut self, check: &str, errors: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.errors.len();
        self.errors.extend(errors);
        let added = self.errors.len() - before;
        if added > 0 {
            warn!("{check}: {added} validation error(s)");
        } else {
            debug!("{check}: ok");
        }
        added
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn finish(self) -> Verdict {
        if self.errors.is_empty() {
            Verdict::Clean
        } else {
            Verdict::Failed(ValidationErrors(self.errors))
        }
    }
}
