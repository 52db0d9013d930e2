//! Application root
//!
//! [`Portfolio`] owns the loader, the publications controller and the
//! citation modal, and is handed the document it renders into. There is no
//! global state: everything a section needs flows in through here.

use std::sync::Arc;
use std::time::Instant;

use folio_domain::{
    validate_project, validate_publications, validate_timeline_entry, Project, Publication,
    PublicationId, TimelineEntry, TimelineKind, ValidationIssue, ValidationSeverity,
};
use futures::future::join_all;

use crate::config::FolioConfig;
use crate::error::{ClipboardError, ConfigError, DataLoadError};
use crate::filter::PublicationIndex;
use crate::loader::DataLoader;
use crate::modal::{CitationModal, Clipboard, CopyMethod, ModalKey};
use crate::render::{
    render_load_error, render_projects, render_timeline, Markup, PROJECTS_CONTAINER,
    PUBLICATIONS_CONTAINER,
};
use crate::view::{mount, Document, PublicationsController, ViewEvent, ViewUpdate};

/// Optional container the citation dialog is rendered into
pub const MODAL_CONTAINER: &str = "citation-modal-root";

/// Outcome of mounting every section
#[derive(Debug, Default)]
pub struct MountReport {
    /// Containers that received their section
    pub mounted: Vec<String>,
    /// Containers absent from the document
    pub skipped: Vec<String>,
    /// Documents that failed; their containers show an inline error
    pub failed: Vec<DataLoadError>,
    /// Data-quality warnings logged while mounting
    pub warnings: usize,
}

impl MountReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

pub struct Portfolio {
    config: FolioConfig,
    loader: Arc<DataLoader>,
    publications: Option<PublicationsController>,
    modal: CitationModal,
}

impl Portfolio {
    pub fn new(config: FolioConfig, loader: Arc<DataLoader>) -> Self {
        let modal = CitationModal::new(config.view.copy_feedback());
        Self {
            config,
            loader,
            publications: None,
            modal,
        }
    }

    /// Build the loader from the configured data source
    pub fn from_config(config: FolioConfig) -> Result<Self, ConfigError> {
        let source = config.data.build_source()?;
        let loader = Arc::new(DataLoader::new(source, config.data.catalog()));
        Ok(Self::new(config, loader))
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn loader(&self) -> &Arc<DataLoader> {
        &self.loader
    }

    pub fn publications(&self) -> Option<&PublicationsController> {
        self.publications.as_ref()
    }

    pub fn modal(&self) -> &CitationModal {
        &self.modal
    }

    /// Load every section present in `doc` concurrently and render it.
    ///
    /// A failed document only affects its own container.
    pub async fn mount_all<D: Document + ?Sized>(&mut self, doc: &mut D) -> MountReport {
        let mut report = MountReport::default();
        let mut present = |container: &str| {
            let found = doc.has_container(container);
            if !found {
                tracing::warn!(container, "render target not found; skipping section");
                report.skipped.push(container.to_string());
            }
            found
        };

        let want_publications = present(PUBLICATIONS_CONTAINER);
        let timeline_kinds: Vec<TimelineKind> = TimelineKind::ALL
            .into_iter()
            .filter(|kind| present(kind.container_id()))
            .collect();
        let want_projects = present(PROJECTS_CONTAINER);

        let loader = Arc::clone(&self.loader);
        let (publications, timelines, projects) = tokio::join!(
            async {
                if want_publications {
                    Some(loader.load_records::<Publication>("publications").await)
                } else {
                    None
                }
            },
            join_all(timeline_kinds.iter().map(|&kind| {
                let loader = &loader;
                async move {
                    (
                        kind,
                        loader.load_records::<TimelineEntry>(kind.document()).await,
                    )
                }
            })),
            async {
                if want_projects {
                    Some(loader.load_records::<Project>("projects").await)
                } else {
                    None
                }
            },
        );

        if let Some(result) = publications {
            match result {
                Ok(records) => {
                    let issues = validate_publications(&records);
                    report.warnings += log_issues("publications", issues);
                    let mut controller = PublicationsController::new(
                        PublicationIndex::new(records),
                        self.config.view.search_debounce(),
                    );
                    if let Some(pass) = controller.render() {
                        mount_section(doc, PUBLICATIONS_CONTAINER, Ok(pass.markup), &mut report);
                    }
                    self.publications = Some(controller);
                }
                Err(err) => {
                    let markup = render_load_error("publications", &err);
                    mount_section(doc, PUBLICATIONS_CONTAINER, Err((markup, err)), &mut report);
                }
            }
        }

        for (kind, result) in timelines {
            let container = kind.container_id();
            match result {
                Ok(entries) => {
                    let issues = entries
                        .iter()
                        .enumerate()
                        .flat_map(|(i, entry)| validate_timeline_entry(i, entry))
                        .collect();
                    report.warnings += log_issues(kind.document(), issues);
                    let markup = render_timeline(&entries, kind);
                    mount_section(doc, container, Ok(markup), &mut report);
                }
                Err(err) => {
                    let markup = render_load_error(kind.document(), &err);
                    mount_section(doc, container, Err((markup, err)), &mut report);
                }
            }
        }

        if let Some(result) = projects {
            match result {
                Ok(projects) => {
                    let issues = projects.iter().flat_map(validate_project).collect();
                    report.warnings += log_issues("projects", issues);
                    let markup = render_projects(&projects);
                    mount_section(doc, PROJECTS_CONTAINER, Ok(markup), &mut report);
                }
                Err(err) => {
                    let markup = render_load_error("projects", &err);
                    mount_section(doc, PROJECTS_CONTAINER, Err((markup, err)), &mut report);
                }
            }
        }

        tracing::info!(
            mounted = report.mounted.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "portfolio mounted"
        );
        report
    }

    /// Route a publications event and apply its render to the document
    pub fn handle<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        event: ViewEvent,
        now: Instant,
    ) -> Option<ViewUpdate> {
        let controller = self.publications.as_mut()?;
        let update = controller.dispatch(event, now)?;
        match &update {
            ViewUpdate::Render(pass) => {
                mount(doc, PUBLICATIONS_CONTAINER, pass.markup.clone());
            }
            ViewUpdate::Panel(_) => {
                if let Some(pass) = controller.render() {
                    mount(doc, PUBLICATIONS_CONTAINER, pass.markup);
                }
            }
        }
        Some(update)
    }

    /// Apply a due debounced search
    pub fn tick<D: Document + ?Sized>(&mut self, doc: &mut D, now: Instant) -> bool {
        let Some(pass) = self.publications.as_mut().and_then(|c| c.tick(now)) else {
            return false;
        };
        mount(doc, PUBLICATIONS_CONTAINER, pass.markup)
    }

    /// Open the citation dialog for a record with valid BibTeX
    pub fn open_citation<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        id: &PublicationId,
        now: Instant,
    ) -> bool {
        let Some((title, citation)) = self
            .publications
            .as_ref()
            .and_then(|c| c.citation_for(id))
        else {
            tracing::debug!(publication = %id, "no citation available");
            return false;
        };
        let (title, citation) = (title.to_string(), citation.to_string());
        let opened = self.modal.open(doc, title, citation);
        if opened {
            self.mount_modal(doc, now);
        }
        opened
    }

    pub fn close_citation<D: Document + ?Sized>(&mut self, doc: &mut D, now: Instant) -> bool {
        let closed = self.modal.close(doc);
        if closed {
            self.mount_modal(doc, now);
        }
        closed
    }

    pub fn modal_key<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        key: ModalKey,
        now: Instant,
    ) -> bool {
        let was_open = self.modal.is_open();
        let handled = self.modal.handle_key(doc, key);
        if was_open && !self.modal.is_open() {
            self.mount_modal(doc, now);
        }
        handled
    }

    pub async fn copy_citation<C: Clipboard + ?Sized, D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        clipboard: &C,
        now: Instant,
    ) -> Result<CopyMethod, ClipboardError> {
        let result = self.modal.copy(clipboard, now).await;
        self.mount_modal(doc, now);
        result
    }

    fn mount_modal<D: Document + ?Sized>(&self, doc: &mut D, now: Instant) {
        if doc.has_container(MODAL_CONTAINER) {
            mount(doc, MODAL_CONTAINER, self.modal.render(now));
        }
    }
}

fn mount_section<D: Document + ?Sized>(
    doc: &mut D,
    container: &str,
    outcome: Result<Markup, (Markup, DataLoadError)>,
    report: &mut MountReport,
) {
    match outcome {
        Ok(markup) => {
            if mount(doc, container, markup) {
                report.mounted.push(container.to_string());
            }
        }
        Err((markup, err)) => {
            tracing::warn!(container, error = %err, "section failed to load");
            mount(doc, container, markup);
            report.failed.push(err);
        }
    }
}

fn log_issues(document: &str, issues: Vec<ValidationIssue>) -> usize {
    let mut warnings = 0;
    for issue in &issues {
        match issue.severity {
            ValidationSeverity::Warning => {
                warnings += 1;
                tracing::warn!(document, issue = %issue, "data quality");
            }
            ValidationSeverity::Info => tracing::debug!(document, issue = %issue, "data quality"),
        }
    }
    warnings
}
