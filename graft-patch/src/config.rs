//! `graft.toml` configuration.
//!
//! Every key has a default, so a project without a config file patches
//! `src/app.ts`, class `App`, with two-space indentation and single quotes.

use std::path::{Path, PathBuf};

use graft_core::Indent;
use graft_ts::{Quote, Style};
use miette::SourceSpan;
use serde::Deserialize;

use crate::{Error, Result};

/// File name looked up in the destination directory.
pub const CONFIG_FILE: &str = "graft.toml";

/// JavaScript reserved words that cannot name a class, method or binding.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: TargetConfig,
    pub style: StyleConfig,
    pub api_docs: ApiDocsConfig,
}

/// The file and class to patch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Path of the source file, relative to the destination directory.
    pub file: PathBuf,
    pub class: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("src/app.ts"),
            class: "App".to_string(),
        }
    }
}

/// Canonical output style.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub indent: u8,
    pub quote: Quote,
    pub print_width: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            quote: Quote::Single,
            print_width: Style::DEFAULT_PRINT_WIDTH,
        }
    }
}

impl StyleConfig {
    pub fn to_style(&self) -> Style {
        Style {
            indent: Indent::spaces(self.indent),
            quote: self.quote,
            print_width: self.print_width,
        }
    }
}

/// Settings for the API documentation feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiDocsConfig {
    /// Name of the generated setup method.
    pub method: String,
    /// Route the documentation UI is mounted on.
    pub route: String,
    pub openapi: String,
    pub title: String,
    pub version: String,
    pub description: String,
    /// Globs scanned for JSDoc annotations.
    pub apis: Vec<String>,
    /// Declare a JWT bearer security scheme.
    pub bearer_auth: bool,
    /// Environment binding holding the public server URL.
    pub server_url_var: String,
    /// Module exporting `server_url_var`.
    pub env_module: String,
    pub anchors: AnchorsConfig,
}

impl Default for ApiDocsConfig {
    fn default() -> Self {
        Self {
            method: "initializeSwagger".to_string(),
            route: "/api-docs".to_string(),
            openapi: "3.0.0".to_string(),
            title: "REST API".to_string(),
            version: "1.0.0".to_string(),
            description: "Example API Documentation".to_string(),
            apis: vec!["swagger.yaml".to_string(), "src/controllers/*.ts".to_string()],
            bearer_auth: true,
            server_url_var: "API_SERVER_URL".to_string(),
            env_module: "@config/env".to_string(),
            anchors: AnchorsConfig::default(),
        }
    }
}

/// Anchors the API documentation edits are placed against.
///
/// An empty string disables the anchor, so the edit falls straight back to
/// its default position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorsConfig {
    /// Import the new imports follow.
    pub import_after: String,
    /// Method the new method precedes.
    pub method_before: String,
    /// Constructor call the new call precedes.
    pub call_before: String,
    /// Constructor call the new call follows when `call_before` is absent.
    pub call_after: String,
}

impl Default for AnchorsConfig {
    fn default() -> Self {
        Self {
            import_after: "morgan".to_string(),
            method_before: "initializeErrorHandling".to_string(),
            call_before: "initializeErrorHandling".to_string(),
            call_after: "initializeRoutes".to_string(),
        }
    }
}

impl AnchorsConfig {
    pub fn import_after(&self) -> Option<&str> {
        non_empty(&self.import_after)
    }

    pub fn method_before(&self) -> Option<&str> {
        non_empty(&self.method_before)
    }

    pub fn call_before(&self) -> Option<&str> {
        non_empty(&self.call_before)
    }

    pub fn call_after(&self) -> Option<&str> {
        non_empty(&self.call_after)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl Config {
    /// Load `graft.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let content = graft_core::read_if_exists(&path).map_err(|source| {
            Box::new(Error::Read {
                path: path.clone(),
                source,
            })
        })?;
        match content {
            Some(content) => Self::from_str_with_filename(&content, &path.display().to_string()),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration text.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))?;
        Validator::new(content, filename).validate(&config)?;
        Ok(config)
    }

    pub fn style(&self) -> Style {
        self.style.to_style()
    }
}

/// Validation context carrying the source for error spans.
struct Validator<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> Validator<'a> {
    fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    fn validate(&self, config: &Config) -> Result<()> {
        self.identifier(&config.target.class, "target.class")?;
        self.identifier(&config.api_docs.method, "api_docs.method")?;
        self.identifier(&config.api_docs.server_url_var, "api_docs.server_url_var")?;

        let anchors = &config.api_docs.anchors;
        for (value, key) in [
            (anchors.method_before(), "api_docs.anchors.method_before"),
            (anchors.call_before(), "api_docs.anchors.call_before"),
            (anchors.call_after(), "api_docs.anchors.call_after"),
        ] {
            if let Some(value) = value {
                self.identifier(value, key)?;
            }
        }

        if config.target.file.as_os_str().is_empty() {
            return Err(self.error("target.file must not be empty", None, "file"));
        }
        if !(1..=Indent::MAX_WIDTH).contains(&config.style.indent) {
            return Err(self.error(
                format!("style.indent must be between 1 and {}", Indent::MAX_WIDTH),
                Some("two spaces is the usual TypeScript indentation".to_string()),
                "indent",
            ));
        }
        if config.style.print_width < 40 {
            return Err(self.error(
                "style.print_width must be at least 40",
                None,
                "print_width",
            ));
        }
        Ok(())
    }

    fn identifier(&self, name: &str, key: &str) -> Result<()> {
        let reason = if name.is_empty() {
            Some("identifier is empty")
        } else if !is_identifier(name) {
            Some("use only letters, digits, `_` and `$`, not starting with a digit")
        } else if RESERVED.contains(&name) {
            Some("reserved words cannot be used as names")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(self.error(
                format!("invalid {} '{}'", key, name),
                Some(reason.to_string()),
                &format!("\"{}\"", name),
            )),
            None => Ok(()),
        }
    }

    /// Build a validation error pointing at the first occurrence of `needle`.
    fn error(&self, message: impl Into<String>, help: Option<String>, needle: &str) -> Box<Error> {
        let span = self
            .src
            .find(needle)
            .map(|start| SourceSpan::from((start, needle.len())));
        Error::config_validation(message, help, self.src, self.filename, span)
    }
}

/// Whether `name` is a valid JavaScript identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Config> {
        Config::from_str_with_filename(content, "graft.toml")
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.target.file, PathBuf::from("src/app.ts"));
        assert_eq!(config.api_docs.anchors.import_after(), Some("morgan"));
        assert_eq!(config.style(), Style::default());
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [target]
            class = "Server"

            [style]
            indent = 4
            quote = "double"

            [api_docs]
            title = "Orders API"
            bearer_auth = false

            [api_docs.anchors]
            call_after = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.target.class, "Server");
        assert_eq!(config.target.file, PathBuf::from("src/app.ts"));
        assert_eq!(config.style().indent, Indent::FOUR);
        assert_eq!(config.style().quote, Quote::Double);
        assert_eq!(config.api_docs.title, "Orders API");
        assert!(!config.api_docs.bearer_auth);
        assert_eq!(config.api_docs.anchors.call_after(), None);
        assert_eq!(config.api_docs.anchors.call_before(), Some("initializeErrorHandling"));
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let err = parse("[target]\nclas = \"App\"\n").unwrap_err();
        assert!(matches!(*err, Error::ConfigParse { span: Some(_), .. }));
    }

    #[test]
    fn test_invalid_identifier_points_at_value() {
        let content = "[target]\nclass = \"my-app\"\n";
        let err = parse(content).unwrap_err();
        match *err {
            Error::ConfigValidation { span, message, .. } => {
                assert_eq!(message, "invalid target.class 'my-app'");
                let span = span.expect("span");
                assert_eq!(span.offset(), content.find("\"my-app\"").unwrap());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reserved_word_rejected() {
        assert!(parse("[api_docs]\nmethod = \"delete\"\n").is_err());
    }

    #[test]
    fn test_style_limits() {
        assert!(parse("[style]\nindent = 0\n").is_err());
        assert!(parse("[style]\nindent = 9\n").is_err());
        assert!(parse("[style]\nprint_width = 20\n").is_err());
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("initializeSwagger"));
        assert!(is_identifier("$el"));
        assert!(is_identifier("_private1"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(Config::load(temp.path()).unwrap(), Config::default());
    }
}
