use folio_domain::{TimelineEntry, TimelineKind};

use super::markup::{safe_href, Element, Markup};

/// Render one timeline entry.
///
/// Education entries label the position as a degree; the markup is otherwise
/// the same for every kind.
pub fn render_timeline_entry(entry: &TimelineEntry, kind: TimelineKind) -> Markup {
    let mut header = Element::new("div").class("timeline-header");
    if let Some(logo) = entry.logo.as_deref().and_then(safe_href) {
        header = header.child(
            Element::void("img")
                .class("timeline-logo")
                .attr("src", logo)
                .attr("alt", format!("{} logo", entry.organization))
                .attr("loading", "lazy"),
        );
    }

    let position_class = match kind {
        TimelineKind::Education => "timeline-degree",
        TimelineKind::Experience | TimelineKind::Volunteering => "timeline-position",
    };
    let mut heading = Element::new("div")
        .class("timeline-heading")
        .child(Element::new("h4").class(position_class).text(&entry.position))
        .child(
            Element::new("p")
                .class("timeline-organization")
                .text(&entry.organization),
        );
    if !entry.location.is_empty() {
        heading = heading.child(
            Element::new("p")
                .class("timeline-location")
                .text(&entry.location),
        );
    }
    header = header.child(heading).child(
        Element::new("span")
            .class("timeline-dates")
            .text(&entry.date_range()),
    );

    let mut item = Element::new("div")
        .class(if entry.current {
            "timeline-item current"
        } else {
            "timeline-item"
        })
        .attr("data-kind", kind.document())
        .child(Element::new("div").class("timeline-marker"))
        .child(header);

    if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
        item = item.child(
            Element::new("p")
                .class("timeline-description")
                .text(description),
        );
    }

    if !entry.responsibilities.is_empty() {
        item = item.child(
            Element::new("ul").class("timeline-responsibilities").children(
                entry
                    .responsibilities
                    .iter()
                    .map(|r| Element::new("li").text(r).render()),
            ),
        );
    }

    if !entry.technologies.is_empty() {
        item = item.child(tag_list("timeline-technologies", &entry.technologies));
    }

    item.render()
}

/// Render a whole timeline section in the given order
pub fn render_timeline(entries: &[TimelineEntry], kind: TimelineKind) -> Markup {
    if entries.is_empty() {
        return Element::new("p")
            .class("timeline-empty")
            .text("Nothing to show yet.")
            .render();
    }

    Element::new("div")
        .class("timeline")
        .attr("aria-label", kind.heading())
        .children(entries.iter().map(|e| render_timeline_entry(e, kind)))
        .render()
}

pub(crate) fn tag_list(class: &'static str, tags: &[String]) -> Markup {
    Element::new("ul")
        .class(class)
        .children(tags.iter().map(|t| Element::new("li").class("tag").text(t).render()))
        .render()
}
