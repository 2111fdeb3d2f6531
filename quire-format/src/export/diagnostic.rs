//! Diagnostics reported while exporting

use std::fmt::{self, Display, Formatter};

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
    /// Stops the export.
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message)
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Diagnostics collected during one export run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. A fatal one is returned as the error that aborts
    /// the run.
    pub fn report(&mut self, diagnostic: Diagnostic) -> Result<(), ExportError> {
        match diagnostic.severity {
            Severity::Fatal => {
                tracing::error!(%diagnostic, "export aborted");
                return Err(ExportError::Fatal(diagnostic));
            }
            Severity::Error => tracing::error!(%diagnostic),
            Severity::Warning => tracing::warn!(%diagnostic),
            Severity::Note => tracing::info!(%diagnostic),
        }
        self.entries.push(diagnostic);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_diagnostics_abort() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.report(Diagnostic::warning("odd bullet")).is_ok());

        let fatal = Diagnostic::fatal("unknown style \"xhtml\"");
        assert_eq!(
            diagnostics.report(fatal.clone()),
            Err(ExportError::Fatal(fatal))
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn display_names_the_severity() {
        assert_eq!(
            Diagnostic::warning("no LaTeX bullet").to_string(),
            "warning: no LaTeX bullet"
        );
        assert_eq!(Diagnostic::fatal("bad").to_string(), "fatal error: bad");
    }
}
