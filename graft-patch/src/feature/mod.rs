//! Injectable features and the edit plans they expand to.

mod api_docs;

use std::{fmt, str::FromStr};

pub use api_docs::{ApiDocsBody, api_docs_plan};
use graft_ts::{EditKind, EditOperation};

use crate::Config;

/// A feature that can be wired into the application source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// OpenAPI documentation served by swagger-ui-express.
    ApiDocs,
}

impl Feature {
    pub const ALL: &'static [Feature] = &[Feature::ApiDocs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::ApiDocs => "api-docs",
        }
    }

    /// Expand the feature into its ordered edit plan.
    pub fn plan(&self, config: &Config) -> FeaturePlan {
        match self {
            Feature::ApiDocs => api_docs_plan(&config.api_docs, config.style().indent),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api-docs" | "apidocs" | "swagger" => Ok(Feature::ApiDocs),
            _ => Err(format!("unknown feature '{}', expected 'api-docs'", s)),
        }
    }
}

/// The ordered edits that implement one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturePlan {
    pub feature: Feature,
    pub edits: Vec<EditOperation>,
}

impl FeaturePlan {
    /// Edits of one kind, in plan order.
    pub fn edits_of(&self, kind: EditKind) -> impl Iterator<Item = &EditOperation> {
        self.edits.iter().filter(move |edit| edit.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Feature::from_str("api-docs").unwrap(), Feature::ApiDocs);
        assert_eq!(Feature::from_str("Swagger").unwrap(), Feature::ApiDocs);
        assert!(Feature::from_str("graphql").is_err());
    }

    #[test]
    fn test_plan_groups_by_kind() {
        let plan = Feature::ApiDocs.plan(&Config::default());
        assert_eq!(plan.edits_of(EditKind::Import).count(), 3);
        assert_eq!(plan.edits_of(EditKind::Method).count(), 1);
        assert_eq!(plan.edits_of(EditKind::Constructor).count(), 1);
    }
}
