//! Resolution of raw variable identifiers to the names the learner sees.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::BlockDocument;

/// One entry of a declaration section.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub id: String,
}

/// A document being edited live, whose declarations can be enumerated even
/// when they were not part of a serialized snapshot.
pub trait LiveDocument {
    fn declarations(&self) -> Vec<Declaration>;
}

impl LiveDocument for Vec<Declaration> {
    fn declarations(&self) -> Vec<Declaration> {
        self.clone()
    }
}

impl LiveDocument for BlockDocument {
    fn declarations(&self) -> Vec<Declaration> {
        BlockDocument::declarations(self).to_vec()
    }
}

/// Mapping from raw identifier to declared name. Built once per document
/// and not changed afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableTable {
    names: HashMap<String, String>,
}

impl VariableTable {
    /// Build the table from the document's own declarations, or from the
    /// live document's when the document declares nothing itself.
    pub fn resolve_for(document: &BlockDocument, live: Option<&dyn LiveDocument>) -> VariableTable {
        let own = document.declarations();

        if !own.is_empty() {
            return VariableTable::from_declarations(own.iter());
        }

        match live {
            Some(live) => {
                let declarations = live.declarations();
                debug!(
                    "Document declares no variables; using {} from live document",
                    declarations.len()
                );
                VariableTable::from_declarations(declarations.iter())
            }
            None => VariableTable::default(),
        }
    }

    pub fn from_declarations<'d>(declarations: impl Iterator<Item = &'d Declaration>) -> VariableTable {
        let names = declarations
            .map(|declaration| {
                (
                    declaration
                        .id
                        .clone(),
                    declaration
                        .name
                        .clone(),
                )
            })
            .collect();

        VariableTable { names }
    }

    /// Look up the declared name for a raw identifier. An identifier with no
    /// mapping is returned unchanged, so two unresolved references to the
    /// same identifier still compare equal.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        match self
            .names
            .get(raw)
        {
            Some(name) => name,
            None => raw,
        }
    }

    pub fn len(&self) -> usize {
        self.names
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.names
            .is_empty()
    }
}
