//! # Edit Session Management
//!
//! An EditSession is one editor's view of a design: the current document
//! snapshot, the id generator blocks are stamped from, a version counter
//! and the selected block.

use crate::{EditorError, Mutation};
use mailframe_document::{BlockId, BlockType, Document, IdGenerator};
use tracing::{debug, warn};

/// Outcome of a mutation applied through the session
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// Whether the document snapshot changed
    pub changed: bool,

    /// Block created by the mutation
    pub created: Option<BlockId>,
}

pub struct EditSession {
    document: Document,
    ids: IdGenerator,
    version: u64,
    selected: Option<BlockId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        Self::with_ids(document, IdGenerator::new())
    }

    /// Session with a caller-provided id generator (deterministic ids)
    pub fn with_ids(document: Document, ids: IdGenerator) -> Self {
        Self {
            document,
            ids,
            version: 0,
            selected: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a block, or clear the selection with `None`
    pub fn select(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        match id {
            Some(id) if !self.document.contains(id) => {
                Err(EditorError::UnknownSelection(id.to_string()))
            }
            Some(id) => {
                self.selected = Some(id.to_string());
                Ok(())
            }
            None => {
                self.selected = None;
                Ok(())
            }
        }
    }

    /// Validate and apply a mutation
    ///
    /// A rejected mutation leaves the document, version and selection as
    /// they were.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        if let Err(e) = mutation.validate(&self.document) {
            warn!(error = %e, "Rejected mutation");
            return Err(e.into());
        }

        let applied = mutation.apply(&self.document, &mut self.ids);
        let changed = applied.document != self.document;

        if changed {
            self.document = applied.document;
            self.version += 1;
        }

        if let Some(created) = &applied.created {
            self.selected = Some(created.clone());
        } else if self
            .selected
            .as_deref()
            .is_some_and(|id| !self.document.contains(id))
        {
            self.selected = None;
        }

        debug!(version = self.version, changed, "Applied mutation");

        Ok(MutationResult {
            version: self.version,
            changed,
            created: applied.created,
        })
    }

    /// Add a block by its type name, as typed by a user
    pub fn add_block_named(
        &mut self,
        name: &str,
        index: Option<usize>,
    ) -> Result<MutationResult, EditorError> {
        let block_type: BlockType = name.parse()?;
        self.apply(Mutation::AddBlock { block_type, index })
    }

    /// Swap in a loaded document, dropping the selection
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.selected = None;
        self.version += 1;
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
