//! The accumulated-issue collector threaded through builder calls.
//!
//! Builder-level problems (unresolvable references, unsupported resource
//! kinds) are recorded here instead of failing immediately; the caller runs
//! one validation gate per operation via [`Issues::into_result`].

use crate::error::TranslateError;

/// An explicit collector of non-fatal builder problems.
#[derive(Debug, Clone, Default)]
pub struct Issues {
    items: Vec<String>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem.
    pub fn push(&mut self, issue: impl Into<String>) {
        self.items.push(issue.into());
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The validation gate: succeeds when nothing was recorded, otherwise
    /// aborts with every recorded issue aggregated into one error.
    pub fn into_result(self) -> Result<(), TranslateError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(TranslateError::validation(self.items))
        }
    }
}
