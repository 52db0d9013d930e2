//! Publication entries and the filterable publication list

use folio_domain::{Author, Publication, PublicationId};

use super::markup::{safe_href, Element, Markup};
use crate::filter::{FilterState, PublicationIndex};

/// Container the publication list is mounted into
pub const PUBLICATIONS_CONTAINER: &str = "publications-list";
/// Id of the free-text search input inside the list
pub const SEARCH_INPUT_ID: &str = "publication-search";

/// Render one publication with its abstract panel collapsed
pub fn render_publication(publication: &Publication) -> Markup {
    render_publication_with(publication, false)
}

/// Render one publication; `expanded` opens its abstract panel.
///
/// The cite button is only emitted when the record carries valid BibTeX.
pub fn render_publication_with(publication: &Publication, expanded: bool) -> Markup {
    let id = publication.id.as_str();

    let mut meta = Element::new("div").class("publication-meta").child(
        Element::new("span")
            .class(format!("publication-type type-{}", publication.kind.as_str()))
            .text(publication.kind.label()),
    );
    meta = meta.child(
        Element::new("span")
            .class("publication-year")
            .text(&publication.year.to_string()),
    );
    if let Some(short) = publication.venue_short.as_deref().filter(|s| !s.is_empty()) {
        meta = meta.child(Element::new("span").class("venue-short").text(short));
    }

    let title = match publication.url.as_deref().and_then(safe_href) {
        Some(href) => Element::new("a")
            .attr("href", href)
            .external()
            .text(&publication.title)
            .render(),
        None => Markup::text(&publication.title),
    };

    let mut article = Element::new("article")
        .class(if publication.featured {
            "publication-item featured"
        } else {
            "publication-item"
        })
        .attr("id", format!("pub-{}", id))
        .attr("data-publication-id", id)
        .attr("data-year", publication.year.to_string())
        .attr("data-type", publication.kind.as_str())
        .child(meta)
        .child(Element::new("h4").class("publication-title").child(title));

    if !publication.authors.is_empty() {
        article = article.child(
            Element::new("p")
                .class("publication-authors")
                .child(render_authors(&publication.authors)),
        );
    }

    if !publication.venue.is_empty() {
        article = article.child(
            Element::new("p")
                .class("publication-venue")
                .text(&publication.venue),
        );
    }

    if !publication.keywords.is_empty() {
        article = article.child(
            Element::new("ul").class("publication-keywords").children(
                publication
                    .keywords
                    .iter()
                    .map(|k| Element::new("li").class("keyword").text(k).render()),
            ),
        );
    }

    let actions = render_actions(publication, expanded);
    if !actions.is_empty() {
        article = article.child(Element::new("div").class("publication-links").child(actions));
    }

    if let Some(abstract_text) = publication.abstract_text.as_deref().filter(|a| !a.is_empty()) {
        article = article.child(
            Element::new("div")
                .class("publication-abstract")
                .attr("id", format!("abstract-{}", id))
                .flag("hidden", !expanded)
                .child(Element::new("p").text(abstract_text)),
        );
    }

    article.render()
}

/// Compact card for the featured block, linking to the full entry below
fn render_featured_card(publication: &Publication) -> Markup {
    let mut card = Element::new("article")
        .class("featured-card")
        .attr("data-publication-id", publication.id.as_str())
        .child(
            Element::new("span")
                .class(format!("publication-type type-{}", publication.kind.as_str()))
                .text(publication.kind.label()),
        )
        .child(
            Element::new("h4").child(
                Element::new("a")
                    .attr("href", format!("#pub-{}", publication.id))
                    .text(&publication.title),
            ),
        );
    let venue = publication
        .venue_short
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(publication.venue.as_str());
    if !venue.is_empty() {
        card = card.child(Element::new("p").class("publication-venue").text(venue));
    }
    card.render()
}

fn render_authors(authors: &[Author]) -> Markup {
    let mut out = Markup::new();
    for (i, author) in authors.iter().enumerate() {
        if i > 0 {
            out.push_text(", ");
        }
        if author.is_me {
            out.push(Element::new("strong").class("author-me").text(&author.name));
        } else {
            out.push_text(&author.name);
        }
    }
    out
}

fn render_actions(publication: &Publication, expanded: bool) -> Markup {
    let id = publication.id.as_str();
    let mut actions = Markup::new();

    if let Some(doi) = publication.doi.as_deref().filter(|d| !d.is_empty()) {
        actions.push(
            Element::new("a")
                .class("pub-link pub-doi")
                .attr("href", format!("https://doi.org/{}", doi))
                .external()
                .text("DOI"),
        );
    }

    if let Some(pdf) = publication.pdf_url.as_deref().and_then(safe_href) {
        actions.push(
            Element::new("a")
                .class("pub-link pub-pdf")
                .attr("href", pdf)
                .external()
                .text("PDF"),
        );
    }

    if publication.abstract_text.as_deref().is_some_and(|a| !a.is_empty()) {
        actions.push(
            Element::new("button")
                .attr("type", "button")
                .class("pub-link abstract-toggle")
                .attr("data-action", "toggle-abstract")
                .attr("data-publication-id", id)
                .attr("aria-controls", format!("abstract-{}", id))
                .attr("aria-expanded", if expanded { "true" } else { "false" })
                .text("Abstract"),
        );
    }

    if publication.has_valid_bibtex() {
        actions.push(
            Element::new("button")
                .attr("type", "button")
                .attr("id", format!("cite-{}", id))
                .class("pub-link cite-btn")
                .attr("data-action", "cite")
                .attr("data-publication-id", id)
                .attr("aria-haspopup", "dialog")
                .text("Cite"),
        );
    }

    actions
}

/// Render the whole publications section for a filter state.
///
/// `search_value` is the text to show in the search box, which may run ahead
/// of the committed `state.search` while a debounced update is pending.
pub fn render_publication_list(
    index: &PublicationIndex,
    state: &FilterState,
    search_value: &str,
    expanded: Option<&PublicationId>,
) -> Markup {
    let groups = index.grouped(state);
    let shown: usize = groups.iter().map(|g| g.publications.len()).sum();
    let featured = index.featured(state);
    let is_expanded = |p: &Publication| expanded == Some(&p.id);

    let mut section = Markup::new();
    section.push(render_filter_bar(index, state, search_value));
    section.push(
        Element::new("p")
            .class("publications-count")
            .attr("aria-live", "polite")
            .text("Showing ")
            .child(
                Element::new("span")
                    .class("count-value")
                    .text(&shown.to_string()),
            )
            .text(&format!(" of {} publications", index.len())),
    );

    if !featured.is_empty() {
        section.push(
            Element::new("section")
                .class("featured-publications")
                .child(Element::new("h3").text("Featured"))
                .children(featured.iter().map(|&p| render_featured_card(p))),
        );
    }

    for group in &groups {
        section.push(
            Element::new("section")
                .class("publication-year-group")
                .attr("data-year", group.year.to_string())
                .child(
                    Element::new("h3")
                        .class("year-heading")
                        .text(&group.year.to_string()),
                )
                .children(
                    group
                        .publications
                        .iter()
                        .map(|&p| render_publication_with(p, is_expanded(p))),
                ),
        );
    }

    if shown == 0 {
        section.push(
            Element::new("p")
                .class("no-results")
                .text("No publications match the current filters."),
        );
    }

    section
}

fn render_filter_bar(index: &PublicationIndex, state: &FilterState, search_value: &str) -> Markup {
    let year_options = std::iter::once(option("all", "All years", state.year.is_all())).chain(
        index.years().into_iter().map(|year| {
            let value = year.to_string();
            let selected = state.year.matches(&value) && !state.year.is_all();
            option(&value, &value, selected)
        }),
    );

    let type_options = std::iter::once(option("all", "All types", state.kind.is_all())).chain(
        index.types().into_iter().map(|kind| {
            let selected = state.kind.matches(kind.as_str()) && !state.kind.is_all();
            option(kind.as_str(), kind.label(), selected)
        }),
    );

    Element::new("div")
        .class("publications-filters")
        .attr("role", "search")
        .child(
            Element::new("select")
                .attr("id", "publication-year-filter")
                .attr("data-filter", "year")
                .attr("aria-label", "Filter by year")
                .children(year_options),
        )
        .child(
            Element::new("select")
                .attr("id", "publication-type-filter")
                .attr("data-filter", "type")
                .attr("aria-label", "Filter by type")
                .children(type_options),
        )
        .child(
            Element::void("input")
                .attr("type", "search")
                .attr("id", SEARCH_INPUT_ID)
                .attr("value", search_value)
                .attr("placeholder", "Search publications")
                .attr("aria-label", "Search publications")
                .attr("autocomplete", "off"),
        )
        .child(
            Element::new("button")
                .attr("type", "button")
                .class("filter-reset")
                .attr("data-action", "reset")
                .text("Reset"),
        )
        .render()
}

fn option(value: &str, label: &str, selected: bool) -> Markup {
    Element::new("option")
        .attr("value", value)
        .flag("selected", selected)
        .text(label)
        .render()
}
