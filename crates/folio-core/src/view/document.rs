//! Mount points and focus

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RenderTargetMissing;
use crate::render::Markup;

/// Id of an element in the page
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The page the engine renders into
pub trait Document {
    fn has_container(&self, id: &str) -> bool;

    /// Replace the whole content of a container
    fn set_content(&mut self, container: &str, markup: Markup) -> Result<(), RenderTargetMissing>;

    /// The element that currently has keyboard focus
    fn active_element(&self) -> Option<ElementId>;

    fn focus(&mut self, element: &ElementId);
}

/// In-memory document: a fixed set of containers plus a focus pointer
#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    containers: BTreeMap<String, Markup>,
    focused: Option<ElementId>,
    writes: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with the given (empty) containers
    pub fn with_containers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc = Self::new();
        for id in ids {
            doc.add_container(id);
        }
        doc
    }

    pub fn add_container(&mut self, id: &str) {
        self.containers.entry(id.to_string()).or_default();
    }

    pub fn content(&self, container: &str) -> Option<&Markup> {
        self.containers.get(container)
    }

    /// Total number of successful content replacements
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Document for MemoryDocument {
    fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    fn set_content(&mut self, container: &str, markup: Markup) -> Result<(), RenderTargetMissing> {
        let slot = self
            .containers
            .get_mut(container)
            .ok_or_else(|| RenderTargetMissing {
                container: container.to_string(),
            })?;
        *slot = markup;
        self.writes += 1;
        Ok(())
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused.clone()
    }

    fn focus(&mut self, element: &ElementId) {
        self.focused = Some(element.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_content_requires_container() {
        let mut doc = MemoryDocument::with_containers(["projects-grid"]);
        assert!(doc.set_content("projects-grid", Markup::text("x")).is_ok());
        assert_eq!(doc.content("projects-grid").map(Markup::as_str), Some("x"));

        let err = doc.set_content("missing", Markup::new()).unwrap_err();
        assert_eq!(err.container, "missing");
        assert_eq!(doc.writes(), 1);
    }

    #[test]
    fn focus_is_tracked() {
        let mut doc = MemoryDocument::new();
        assert_eq!(doc.active_element(), None);
        doc.focus(&ElementId::from("cite-a"));
        assert_eq!(doc.active_element(), Some(ElementId::new("cite-a")));
    }
}
