//! Record renderer
//!
//! Pure functions from domain records to [`Markup`]. Nothing here touches a
//! document; mounting is the view layer's job.

pub mod markup;
mod project;
mod publication;
mod timeline;

pub use markup::{escape, safe_href, Element, Markup};
pub use project::{render_project_card, render_projects, PROJECTS_CONTAINER};
pub use publication::{
    render_publication, render_publication_list, render_publication_with,
    PUBLICATIONS_CONTAINER, SEARCH_INPUT_ID,
};
pub use timeline::{render_timeline, render_timeline_entry};

use crate::error::DataLoadError;

/// Inline error shown in place of a section whose data failed to load
pub fn render_load_error(section: &str, error: &DataLoadError) -> Markup {
    Element::new("div")
        .class("section-error")
        .attr("role", "alert")
        .attr("data-document", &error.document)
        .child(
            Element::new("p")
                .text(&format!("Could not load {}. Please reload the page to try again.", section)),
        )
        .render()
}
