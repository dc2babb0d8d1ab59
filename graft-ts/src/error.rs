use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for graft-ts operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(graft::read))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(
        code(graft::write),
        help("check that the destination directory exists and is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}")]
    #[diagnostic(
        code(graft::parse_error),
        help("only syntactically valid TypeScript can be patched")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{kind} here")]
        span: SourceSpan,
        name: String,
        kind: String,
    },

    #[error("TypeScript grammar could not be loaded: {message}")]
    #[diagnostic(code(graft::language))]
    Language { message: String },

    #[error("class '{class}' not found")]
    #[diagnostic(
        code(graft::missing_class),
        help("set `class` under [target] in graft.toml to the class that should be patched")
    )]
    MissingClass { class: String },
}

impl Error {
    pub(crate) fn parse(
        source: &str,
        name: &str,
        span: impl Into<SourceSpan>,
        kind: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Self::Parse {
            src: NamedSource::new(name, source.to_string()),
            span: span.into(),
            name: name.to_string(),
            kind: kind.into(),
        })
    }

    pub(crate) fn missing_class(class: &str) -> Box<Self> {
        Box::new(Self::MissingClass {
            class: class.to_string(),
        })
    }
}
