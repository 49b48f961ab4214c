// Validation report

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Report of a [`Validator::validate`](crate::Validator::validate) call.
///
/// Errors are kept as an ordered mapping from label to the list of
/// failure messages recorded for that label. Labels appear in the order
/// they first failed; messages under one label appear in rule execution
/// order. An empty mapping means the subject validated successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: IndexMap<String, Vec<String>>,
}

impl ValidationResult {
    /// Create an empty (successful) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no errors have been recorded.
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure message under the given label.
    ///
    /// Messages for an already-seen label are appended to its list, not
    /// overwritten.
    pub fn append_error(&mut self, label: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(label.into())
            .or_default()
            .push(message.into());
    }

    /// The full label to messages mapping.
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Total number of recorded messages across all labels.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// JSON representation of the report.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_successful(),
            "errors": self.errors,
        })
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, messages)) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", label, messages)?;
        }
        write!(f, "}}")
    }
}
