use folio_domain::Project;

use super::markup::{safe_href, Element, Markup};
use super::timeline::tag_list;

/// Container the project cards are mounted into
pub const PROJECTS_CONTAINER: &str = "projects-grid";

/// Render one project card
pub fn render_project_card(project: &Project) -> Markup {
    let mut card = Element::new("article")
        .class(if project.featured {
            "project-card featured"
        } else {
            "project-card"
        })
        .attr("data-project-id", &project.id)
        .attr_opt(
            "data-category",
            Some(project.category.as_str()).filter(|c| !c.is_empty()),
        );

    if let Some(image) = project.image.as_deref().and_then(safe_href) {
        card = card.child(
            Element::new("div").class("project-image").child(
                Element::void("img")
                    .attr("src", image)
                    .attr("alt", &project.title)
                    .attr("loading", "lazy"),
            ),
        );
    }

    let mut body = Element::new("div")
        .class("project-body")
        .child(Element::new("h4").class("project-title").text(&project.title));
    if !project.short_description.is_empty() {
        body = body.child(
            Element::new("p")
                .class("project-description")
                .text(&project.short_description),
        );
    }
    if !project.technologies.is_empty() {
        body = body.child(tag_list("project-technologies", &project.technologies));
    }

    let mut links: Vec<Markup> = project
        .links
        .entries()
        .into_iter()
        .filter_map(|(label, href)| {
            safe_href(href).map(|href| {
                Element::new("a")
                    .class("project-link")
                    .attr("href", href)
                    .external()
                    .text(label)
                    .render()
            })
        })
        .collect();
    if let Some(details) = project.details_page.as_deref().and_then(safe_href) {
        links.push(
            Element::new("a")
                .class("project-link project-details")
                .attr("href", details)
                .text("Details")
                .render(),
        );
    }
    if !links.is_empty() {
        body = body.child(Element::new("div").class("project-links").children(links));
    }

    card.child(body).render()
}

/// Render the project grid in input order
pub fn render_projects(projects: &[Project]) -> Markup {
    if projects.is_empty() {
        return Element::new("p")
            .class("projects-empty")
            .text("No projects yet.")
            .render();
    }
    Markup::concat(projects.iter().map(render_project_card))
}
