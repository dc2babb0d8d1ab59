use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for graft-patch operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Phase name reported by structural precondition failures.
pub const SOURCE_INJECTION: &str = "source-injection";

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("structural precondition failed in {phase}: class '{class}' not found in '{path}'")]
    #[diagnostic(
        code(graft::structural_precondition),
        help("set `class` under [target] in graft.toml to the class that should be patched")
    )]
    StructuralPrecondition {
        phase: &'static str,
        class: String,
        path: PathBuf,
    },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(graft::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(
        code(graft::write),
        help("the original file was left untouched")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse graft.toml")]
    #[diagnostic(code(graft::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(graft::config_validation))]
    ConfigValidation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] graft_ts::Error),
}

impl Error {
    pub(crate) fn precondition(class: &str, path: impl Into<PathBuf>) -> Box<Self> {
        Box::new(Error::StructuralPrecondition {
            phase: SOURCE_INJECTION,
            class: class.to_string(),
            path: path.into(),
        })
    }

    /// Create a parse error from a toml error with source context
    pub(crate) fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error, pointing at `span` when it is known
    pub(crate) fn config_validation(
        message: impl Into<String>,
        help: Option<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::ConfigValidation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
            help,
        })
    }
}

impl From<Box<graft_ts::Error>> for Box<Error> {
    fn from(error: Box<graft_ts::Error>) -> Self {
        Box::new(match *error {
            graft_ts::Error::Io { path, source } => Error::Read { path, source },
            graft_ts::Error::Write { path, source } => Error::Write { path, source },
            other => Error::Document(other),
        })
    }
}
