//! # Studio
//!
//! Ties an edit session to the persistence and media boundaries.
//!
//! ```text
//!  control / mutation ──► EditSession ──► Document
//!                                           │
//!             save: validate → compile → serialize → DesignStore
//!                                           │
//!                                     Notification
//! ```
//!
//! A failed boundary call becomes an error notification and never touches
//! the document.

use crate::error::{MediaError, StudioError};
use crate::media::{Asset, AssetPicker, MediaLibrary};
use crate::notification::{Notification, RequestTicket};
use crate::store::{DesignStore, SaveRequest, SavedDesign};
use mailframe_compiler_html::{compile_to_html, CompileOptions};
use mailframe_document::{BlockId, Document, IdGenerator};
use mailframe_editor::{EditSession, Mutation, MutationResult};
use mailframe_preview::{render_preview, Control, PreviewView};
use tracing::{info, instrument, warn};

/// Save metadata entered alongside the design
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignMeta {
    pub name: String,
    pub slug: String,
    pub subject: String,
}

pub struct Studio<S: DesignStore, M: MediaLibrary> {
    session: EditSession,
    meta: DesignMeta,
    store: S,
    media: M,
    picker: AssetPicker,
    asset_requests: RequestTicket,
    notifications: Vec<Notification>,
    compile_options: CompileOptions,
}

impl<S: DesignStore, M: MediaLibrary> Studio<S, M> {
    pub fn new(store: S, media: M) -> Self {
        Self::with_session(EditSession::new(), store, media)
    }

    /// Studio with deterministic block ids
    pub fn seeded(seed: &str, store: S, media: M) -> Self {
        Self::with_session(
            EditSession::with_ids(Document::new(), IdGenerator::from_seed(seed)),
            store,
            media,
        )
    }

    pub fn with_session(session: EditSession, store: S, media: M) -> Self {
        Self {
            session,
            meta: DesignMeta::default(),
            store,
            media,
            picker: AssetPicker::new(),
            asset_requests: RequestTicket::default(),
            notifications: Vec::new(),
            compile_options: CompileOptions::default(),
        }
    }

    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.compile_options = options;
        self
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn document(&self) -> &Document {
        self.session.document()
    }

    pub fn meta(&self) -> &DesignMeta {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: DesignMeta) {
        self.meta = meta;
    }

    pub fn picker(&self) -> &AssetPicker {
        &self.picker
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn select(&mut self, block_id: Option<&str>) -> Result<(), StudioError> {
        Ok(self.session.select(block_id)?)
    }

    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, StudioError> {
        Ok(self.session.apply(mutation)?)
    }

    /// Run a toolbar action by its `data-action` name
    pub fn handle_control(&mut self, action: &str, block_id: &str) -> Result<MutationResult, StudioError> {
        let control: Control = action.parse()?;
        self.apply(control.to_mutation(block_id))
    }

    pub fn preview(&self) -> PreviewView {
        render_preview(self.session.document(), self.session.selected())
    }

    pub fn compile(&self) -> String {
        let mut options = self.compile_options.clone();
        if options.title.is_none() && !self.meta.subject.trim().is_empty() {
            options.title = Some(self.meta.subject.clone());
        }
        compile_to_html(self.session.document(), options)
    }

    fn save_request(&self) -> Result<SaveRequest, StudioError> {
        let request = SaveRequest {
            name: self.meta.name.trim().to_string(),
            slug: self.meta.slug.trim().to_string(),
            subject: self.meta.subject.clone(),
            compiled_markup: String::new(),
            raw_design: String::new(),
        };
        request.validate()?;

        Ok(SaveRequest {
            compiled_markup: self.compile(),
            raw_design: self.session.document().to_json()?,
            ..request
        })
    }

    /// Validate, compile and persist the current design
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> Result<SavedDesign, StudioError> {
        let request = match self.save_request() {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Save rejected");
                self.notify(Notification::error(e.to_string()));
                return Err(e);
            }
        };

        match self.store.save(request).await {
            Ok(saved) => {
                info!(version = self.session.version(), "Design saved");
                self.notify(Notification::success(format!("Saved \"{}\"", saved.name)));
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.notify(Notification::error(format!("Save failed: {}", e)));
                Err(e.into())
            }
        }
    }

    /// Reopen a stored design, replacing the current document
    #[instrument(skip(self))]
    pub async fn open(&mut self, slug: &str) -> Result<(), StudioError> {
        let loaded = self
            .store
            .load(slug)
            .await
            .map_err(StudioError::from)
            .and_then(|saved| Ok((Document::from_json(&saved.raw_design)?, saved)));

        match loaded {
            Ok((document, saved)) => {
                self.session.replace_document(document);
                self.meta = DesignMeta {
                    name: saved.name,
                    slug: saved.slug,
                    subject: saved.subject,
                };
                self.notify(Notification::info(format!("Opened \"{}\"", self.meta.name)));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Open failed");
                self.notify(Notification::error(format!("Could not open {}: {}", slug, e)));
                Err(e)
            }
        }
    }

    /// Start an asset request; only the latest ticket's response is kept
    pub fn begin_asset_request(&mut self) -> u64 {
        self.asset_requests.issue()
    }

    /// Accept an asset listing if it answers the latest request
    pub fn receive_assets(&mut self, ticket: u64, result: Result<Vec<Asset>, MediaError>) -> bool {
        if !self.asset_requests.is_current(ticket) {
            warn!(ticket, "Ignoring stale asset response");
            return false;
        }

        match result {
            Ok(assets) => {
                self.picker.set_assets(assets);
                true
            }
            Err(e) => {
                self.notify(Notification::error(format!("Could not load assets: {}", e)));
                false
            }
        }
    }

    pub async fn refresh_assets(&mut self) -> bool {
        let ticket = self.begin_asset_request();
        let result = self.media.list_assets().await;
        self.receive_assets(ticket, result)
    }

    /// Bind a picked image to a media field of a block
    pub fn bind_asset(
        &mut self,
        block_id: &str,
        field: &str,
        asset_id: &str,
    ) -> Result<MutationResult, StudioError> {
        let url = self
            .picker
            .find(asset_id)
            .map(|asset| asset.url.clone())
            .ok_or_else(|| MediaError::AssetNotFound(asset_id.to_string()))?;

        self.apply(Mutation::BindMedia {
            block_id: block_id.to_string(),
            field: field.to_string(),
            url,
        })
    }

    /// Add a block after the selection, or at the end
    pub fn insert_block(&mut self, block_type: &str) -> Result<Option<BlockId>, StudioError> {
        let index = self
            .session
            .selected()
            .and_then(|id| self.session.document().position(id))
            .map(|at| at + 1);
        Ok(self.session.add_block_named(block_type, index)?.created)
    }
}
