use tracing::{info, warn};

use super::{EditOutcome, Placement};
use crate::{
    anchor::{AnchorKind, AnchorSpec, Anchored, Container},
    model::{Entry, ImportDeclaration, Item, NamedImport, SourceDocument},
};

/// Insert an import, or move an existing import of the same module to its
/// canonical position.
///
/// The canonical position is directly after the import of `after`, or after
/// the last import when that anchor is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdit {
    pub import: ImportDeclaration,
    pub after: Option<String>,
}

impl ImportEdit {
    pub fn new(import: ImportDeclaration, after: Option<impl Into<String>>) -> Self {
        Self {
            import,
            after: after.map(Into::into),
        }
    }

    pub(crate) fn apply(&self, doc: &mut SourceDocument) -> EditOutcome {
        let specifier = self.import.specifier();
        let original = doc.items.clone();

        let previous = doc
            .items
            .iter()
            .find(|e| e.node.anchor_name(AnchorKind::Import) == Some(specifier))
            .map(|e| (e.comments.clone(), e.trailing.clone()));
        let removed = doc.remove_imports(specifier);

        let anchored = self
            .after
            .as_deref()
            .and_then(|after| doc.resolve(&AnchorSpec::import(after)).after().map(|i| (i, after)));
        let (index, placement) = match anchored {
            Some((index, after)) => (index, Placement::After(after.to_string())),
            None => {
                if let Some(after) = &self.after {
                    warn!(import = specifier, anchor = %after, "import anchor not found, placing after last import");
                }
                match doc.last_import_index() {
                    Some(last) => (last + 1, Placement::End),
                    None => (0, Placement::Start),
                }
            }
        };

        let mut entry = Entry::new(Item::Import(self.import.clone()));
        if let Some((comments, trailing)) = previous {
            entry.comments = comments;
            entry.trailing = trailing;
        }
        doc.items.insert(index, entry);

        if removed == 0 {
            info!(import = specifier, %placement, "inserted import");
            EditOutcome::Inserted(placement)
        } else if doc.items == original {
            EditOutcome::AlreadyPresent
        } else {
            info!(import = specifier, %placement, removed, "repositioned import");
            EditOutcome::Repositioned(placement)
        }
    }
}

/// Add a named binding to an existing import.
///
/// A missing import, or one that cannot take named bindings (namespace and
/// `require` imports, imports kept verbatim for their comments), skips the
/// edit with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImportEdit {
    pub specifier: String,
    pub name: String,
}

impl NamedImportEdit {
    pub fn new(specifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            name: name.into(),
        }
    }

    pub(crate) fn apply(&self, doc: &mut SourceDocument) -> EditOutcome {
        let Some(import) = doc.import_mut(&self.specifier) else {
            warn!(import = %self.specifier, name = %self.name, "import not found, binding not added");
            return EditOutcome::Skipped(format!("no import of '{}'", self.specifier));
        };
        if import.binds(&self.name) {
            return EditOutcome::AlreadyPresent;
        }
        let reason = if import.is_namespace() {
            Some("is a namespace import")
        } else if import.is_require() {
            Some("is a require import")
        } else if import.is_verbatim() {
            Some("has comments outside its bindings")
        } else {
            None
        };
        if let Some(reason) = reason {
            warn!(import = %self.specifier, name = %self.name, reason, "binding not added");
            return EditOutcome::Skipped(format!("import of '{}' {}", self.specifier, reason));
        }

        import.push_named(NamedImport::new(&self.name));
        info!(import = %self.specifier, name = %self.name, "added named import");
        EditOutcome::Inserted(Placement::End)
    }
}
