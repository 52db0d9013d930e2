//! Citation modal
//!
//! A single dialog showing the BibTeX of one record. It never stacks: opening
//! while open is ignored, closing while closed is ignored. Focus moves into
//! the dialog on open and goes back to whatever had it before on close.

use std::time::{Duration, Instant};

use futures::future::BoxFuture;

use crate::error::ClipboardError;
use crate::render::{Element, Markup};
use crate::view::{Document, ElementId};

pub const MODAL_ID: &str = "citation-modal";
pub const CLOSE_BUTTON_ID: &str = "citation-modal-close";
pub const COPY_BUTTON_ID: &str = "citation-modal-copy";

/// Focusable controls inside the dialog, in tab order
pub const FOCUS_ORDER: [&str; 2] = [CLOSE_BUTTON_ID, COPY_BUTTON_ID];

/// System clipboard access
pub trait Clipboard: Send + Sync {
    /// Asynchronous clipboard API
    fn write_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), ClipboardError>>;

    /// Select-and-copy fallback used when the API fails
    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Which path a successful copy went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Api,
    Legacy,
}

/// Keys the dialog reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Tab,
    ShiftTab,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open {
        title: String,
        content: String,
        return_focus: Option<ElementId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyFeedback {
    Copied,
    Failed,
}

pub struct CitationModal {
    state: ModalState,
    feedback_for: Duration,
    feedback: Option<(CopyFeedback, Instant)>,
}

impl CitationModal {
    pub fn new(feedback_for: Duration) -> Self {
        Self {
            state: ModalState::Closed,
            feedback_for,
            feedback: None,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    /// Citation text currently displayed
    pub fn content(&self) -> Option<&str> {
        match &self.state {
            ModalState::Open { content, .. } => Some(content),
            ModalState::Closed => None,
        }
    }

    /// Show a citation. Returns false if a citation is already open.
    pub fn open<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        if self.is_open() {
            tracing::debug!("citation modal already open; ignoring");
            return false;
        }
        self.state = ModalState::Open {
            title: title.into(),
            content: content.into(),
            return_focus: doc.active_element(),
        };
        self.feedback = None;
        doc.focus(&ElementId::new(CLOSE_BUTTON_ID));
        true
    }

    /// Hide the dialog and restore focus. Returns false if already closed.
    pub fn close<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Closed => false,
            ModalState::Open { return_focus, .. } => {
                if let Some(element) = return_focus {
                    doc.focus(&element);
                }
                self.feedback = None;
                true
            }
        }
    }

    pub fn click_backdrop<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        self.close(doc)
    }

    /// Handle a key press; returns true if the dialog consumed it
    pub fn handle_key<D: Document + ?Sized>(&mut self, doc: &mut D, key: ModalKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            ModalKey::Escape => self.close(doc),
            ModalKey::Tab | ModalKey::ShiftTab => {
                let current = doc
                    .active_element()
                    .and_then(|el| FOCUS_ORDER.iter().position(|id| *id == el.as_str()));
                let last = FOCUS_ORDER.len() - 1;
                let next = match (key, current) {
                    (ModalKey::Tab, Some(i)) if i < last => i + 1,
                    (ModalKey::Tab, _) => 0,
                    (_, Some(i)) if i > 0 => i - 1,
                    (_, _) => last,
                };
                doc.focus(&ElementId::new(FOCUS_ORDER[next]));
                true
            }
        }
    }

    /// Copy the displayed citation, falling back to the legacy path
    pub async fn copy<C: Clipboard + ?Sized>(
        &mut self,
        clipboard: &C,
        now: Instant,
    ) -> Result<CopyMethod, ClipboardError> {
        let text = match &self.state {
            ModalState::Open { content, .. } => content.clone(),
            ModalState::Closed => return Err(ClipboardError::NotOpen),
        };

        let result = match clipboard.write_text(&text).await {
            Ok(()) => Ok(CopyMethod::Api),
            Err(primary) => {
                tracing::debug!(error = %primary, "clipboard API failed; trying legacy copy");
                match clipboard.legacy_copy(&text) {
                    Ok(()) => Ok(CopyMethod::Legacy),
                    Err(fallback) => Err(ClipboardError::Exhausted {
                        primary: primary.to_string(),
                        fallback: fallback.to_string(),
                    }),
                }
            }
        };

        let feedback = match &result {
            Ok(_) => CopyFeedback::Copied,
            Err(err) => {
                tracing::warn!(error = %err, "copy citation failed");
                CopyFeedback::Failed
            }
        };
        self.feedback = Some((feedback, now + self.feedback_for));
        result
    }

    /// Label of the copy button at `now`
    pub fn copy_label(&self, now: Instant) -> &'static str {
        match self.feedback {
            Some((CopyFeedback::Copied, until)) if now < until => "Copied!",
            Some((CopyFeedback::Failed, until)) if now < until => "Copy failed",
            _ => "Copy",
        }
    }

    /// Dialog markup; hidden while closed
    pub fn render(&self, now: Instant) -> Markup {
        let (title, content) = match &self.state {
            ModalState::Open { title, content, .. } => (title.as_str(), content.as_str()),
            ModalState::Closed => ("", ""),
        };

        Element::new("div")
            .class("modal-backdrop")
            .attr("id", MODAL_ID)
            .attr("data-action", "close-modal")
            .flag("hidden", !self.is_open())
            .child(
                Element::new("div")
                    .class("modal")
                    .attr("role", "dialog")
                    .attr("aria-modal", "true")
                    .attr("aria-labelledby", "citation-modal-title")
                    .child(
                        Element::new("div")
                            .class("modal-header")
                            .child(
                                Element::new("h3")
                                    .attr("id", "citation-modal-title")
                                    .text(title),
                            )
                            .child(
                                Element::new("button")
                                    .attr("type", "button")
                                    .attr("id", CLOSE_BUTTON_ID)
                                    .class("modal-close")
                                    .attr("aria-label", "Close")
                                    .text("\u{00d7}"),
                            ),
                    )
                    .child(
                        Element::new("pre")
                            .class("citation-content")
                            .child(Element::new("code").text(content)),
                    )
                    .child(
                        Element::new("button")
                            .attr("type", "button")
                            .attr("id", COPY_BUTTON_ID)
                            .class("copy-btn")
                            .text(self.copy_label(now)),
                    ),
            )
            .render()
    }
}
