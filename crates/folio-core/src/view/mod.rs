//! View controller for the publications section
//!
//! [`PublicationsController`] owns the filter state and turns typed UI events
//! into render passes. Each pass carries the full list markup (with the
//! live search text restored into the input) and a [`ListPatch`] against the
//! previous pass, so a caller can either replace the container or apply the
//! difference.

mod debounce;
mod document;

pub use debounce::SearchDebouncer;
pub use document::{Document, ElementId, MemoryDocument};

use std::collections::HashSet;
use std::time::{Duration, Instant};

use folio_domain::PublicationId;

use crate::filter::{Facet, FilterState, PublicationIndex};
use crate::render::{render_publication_list, Markup};

/// A user interaction with the publications section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SelectYear(Facet),
    SelectType(Facet),
    /// A keystroke in the search box; carries the whole current text
    SearchInput(String),
    /// Explicit submit (Enter) of the current search text
    SearchSubmit,
    Reset,
    /// Open or close the detail panel of one record
    TogglePanel(PublicationId),
}

/// Render cycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCycle {
    #[default]
    Idle,
    Rendering,
}

/// Records entering and leaving the list between two passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub removed: Vec<PublicationId>,
    pub added: Vec<PublicationId>,
    pub retained: usize,
}

impl ListPatch {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Output of one render of the publications section
#[derive(Debug, Clone)]
pub struct RenderPass {
    pub markup: Markup,
    pub shown: usize,
    pub total: usize,
    /// Text placed back into the search input
    pub search_value: String,
    pub patch: ListPatch,
    /// Panel closed by this pass: its record left the list, or a reset
    /// closed it
    pub closed_panel: Option<PublicationId>,
}

/// Change to the open detail panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelChange {
    pub opened: Option<PublicationId>,
    pub closed: Option<PublicationId>,
}

/// What an event asks the page to do
#[derive(Debug, Clone)]
pub enum ViewUpdate {
    Render(RenderPass),
    Panel(PanelChange),
}

pub struct PublicationsController {
    index: PublicationIndex,
    state: FilterState,
    draft: String,
    debouncer: SearchDebouncer,
    cycle: RenderCycle,
    expanded: Option<PublicationId>,
    shown: Vec<PublicationId>,
    renders: usize,
}

impl PublicationsController {
    pub fn new(index: PublicationIndex, debounce: Duration) -> Self {
        Self {
            index,
            state: FilterState::default(),
            draft: String::new(),
            debouncer: SearchDebouncer::new(debounce),
            cycle: RenderCycle::Idle,
            expanded: None,
            shown: Vec::new(),
            renders: 0,
        }
    }

    pub fn index(&self) -> &PublicationIndex {
        &self.index
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Search text as typed, possibly ahead of the committed search
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn cycle(&self) -> RenderCycle {
        self.cycle
    }

    pub fn expanded(&self) -> Option<&PublicationId> {
        self.expanded.as_ref()
    }

    /// Ids shown by the last render, in list order
    pub fn shown(&self) -> &[PublicationId] {
        &self.shown
    }

    /// Number of render passes produced so far
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// When a debounced search is due, if one is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Citation title and text for a record with valid BibTeX
    pub fn citation_for(&self, id: &PublicationId) -> Option<(&str, &str)> {
        self.index
            .get(id)
            .and_then(|p| p.citation().map(|c| (p.title.as_str(), c)))
    }

    pub fn dispatch(&mut self, event: ViewEvent, now: Instant) -> Option<ViewUpdate> {
        match event {
            ViewEvent::SelectYear(year) => {
                if self.state.year == year {
                    return None;
                }
                self.state.year = year;
                self.render().map(ViewUpdate::Render)
            }
            ViewEvent::SelectType(kind) => {
                if self.state.kind == kind {
                    return None;
                }
                self.state.kind = kind;
                self.render().map(ViewUpdate::Render)
            }
            ViewEvent::SearchInput(text) => {
                self.debouncer.schedule(text.as_str(), now);
                self.draft = text;
                None
            }
            ViewEvent::SearchSubmit => {
                self.debouncer.cancel();
                let draft = self.draft.clone();
                self.commit_search(&draft).map(ViewUpdate::Render)
            }
            ViewEvent::Reset => {
                self.debouncer.cancel();
                self.draft.clear();
                self.state.reset();
                let closed = self.expanded.take();
                self.render().map(|mut pass| {
                    pass.closed_panel = pass.closed_panel.or(closed);
                    ViewUpdate::Render(pass)
                })
            }
            ViewEvent::TogglePanel(id) => self.toggle_panel(id).map(ViewUpdate::Panel),
        }
    }

    /// Apply a debounced search whose quiet period has elapsed
    pub fn tick(&mut self, now: Instant) -> Option<RenderPass> {
        let text = self.debouncer.poll(now)?;
        self.commit_search(&text)
    }

    fn commit_search(&mut self, text: &str) -> Option<RenderPass> {
        let search = text.trim();
        if self.state.search == search {
            return None;
        }
        self.state.search = search.to_string();
        self.render()
    }

    fn toggle_panel(&mut self, id: PublicationId) -> Option<PanelChange> {
        if !self.shown.contains(&id) {
            tracing::debug!(publication = %id, "toggle for a record not in the list");
            return None;
        }
        let change = if self.expanded.as_ref() == Some(&id) {
            PanelChange {
                opened: None,
                closed: self.expanded.take(),
            }
        } else {
            PanelChange {
                opened: Some(id.clone()),
                closed: self.expanded.replace(id),
            }
        };
        Some(change)
    }

    /// Render the section for the current state.
    ///
    /// Returns `None` when a render is already in progress.
    pub fn render(&mut self) -> Option<RenderPass> {
        if self.cycle == RenderCycle::Rendering {
            tracing::debug!("render requested while rendering; dropped");
            return None;
        }
        self.cycle = RenderCycle::Rendering;

        let ids: Vec<PublicationId> = self
            .index
            .filtered(&self.state)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();

        let closed_panel = if self
            .expanded
            .as_ref()
            .is_some_and(|open| !ids.contains(open))
        {
            self.expanded.take()
        } else {
            None
        };

        let markup = render_publication_list(
            &self.index,
            &self.state,
            &self.draft,
            self.expanded.as_ref(),
        );
        let patch = diff(&self.shown, &ids);
        let pass = RenderPass {
            markup,
            shown: ids.len(),
            total: self.index.len(),
            search_value: self.draft.clone(),
            patch,
            closed_panel,
        };

        tracing::debug!(
            shown = pass.shown,
            total = pass.total,
            added = pass.patch.added.len(),
            removed = pass.patch.removed.len(),
            "publications rendered"
        );

        self.shown = ids;
        self.renders += 1;
        self.cycle = RenderCycle::Idle;
        Some(pass)
    }
}

fn diff(before: &[PublicationId], after: &[PublicationId]) -> ListPatch {
    let old: HashSet<&PublicationId> = before.iter().collect();
    let new: HashSet<&PublicationId> = after.iter().collect();
    ListPatch {
        removed: before.iter().filter(|id| !new.contains(id)).cloned().collect(),
        added: after.iter().filter(|id| !old.contains(id)).cloned().collect(),
        retained: after.iter().filter(|id| old.contains(id)).count(),
    }
}

/// Replace a container's content; a missing container is logged and skipped
pub fn mount<D: Document + ?Sized>(doc: &mut D, container: &str, markup: Markup) -> bool {
    match doc.set_content(container, markup) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(container, error = %err, "skipping render");
            false
        }
    }
}
