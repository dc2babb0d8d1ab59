//! Diagnostics recorded while patching.
//!
//! Anchor fallbacks and skipped edits are warnings; applied and
//! already-present edits are info. Neither stops the pipeline.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An edit landed somewhere other than its preferred position, or was
    /// skipped.
    Warning,
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// What happened to one planned edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the phase that applied the edit.
    pub phase: &'static str,
    pub message: String,
    /// Class the edit targeted, when there is one.
    pub location: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, phase: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase,
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(phase: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.phase, self.message)?;
        if let Some(class) = &self.location {
            write!(f, " (in class {})", class)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diag = Diagnostic::warning("method", "method initializeSwagger(): placed at end")
            .at("App");
        assert!(diag.severity.is_warning());
        assert_eq!(
            diag.to_string(),
            "warning [method]: method initializeSwagger(): placed at end (in class App)"
        );
        assert_eq!(
            Diagnostic::info("imports", "import 'cors': already present").to_string(),
            "info [imports]: import 'cors': already present"
        );
    }
}
