use serde::{Serialize, Serializer};
use std::fmt;

/// Result of one call to the text generation endpoint.
///
/// A degraded outcome carries a human readable reason and is rendered as
/// plain text wherever the itinerary is serialized, so callers never see an
/// error from the generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(String),
    Degraded(String),
}

impl GenerationOutcome {
    pub fn text(&self) -> &str {
        match self {
            GenerationOutcome::Generated(text) => text,
            GenerationOutcome::Degraded(reason) => reason,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, GenerationOutcome::Degraded(_))
    }

    /// Apply a text transformation to generated content. Degraded reasons are
    /// left as they are.
    pub fn map_generated<F>(self, f: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        match self {
            GenerationOutcome::Generated(text) => GenerationOutcome::Generated(f(&text)),
            degraded => degraded,
        }
    }
}

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for GenerationOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.text())
    }
}
