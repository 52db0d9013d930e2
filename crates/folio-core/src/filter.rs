//! Publication filter and search
//!
//! A [`FilterState`] holds three independent selections: year, type and a
//! free-text query. [`PublicationIndex`] owns the loaded publications and
//! answers queries against a state without ever reordering or mutating them.
//!
//! # Matching
//!
//! - year: `all`, or the record's year printed as a string equals the value
//! - type: `all`, or the record's type string equals the value
//! - search: empty, or the lowercased query is a substring of the lowercased
//!   title, venue, abstract, keywords and author names
//!
//! A value that matches nothing yields an empty result, never an error.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use folio_domain::{Publication, PublicationId, PublicationType};

/// One filter selection: everything, or one exact value
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Parse a control value; `""` and `"all"` mean no restriction
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Facet::All
        } else {
            Facet::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(expected) => expected == value,
        }
    }

    /// The value a select control carries for this facet
    pub fn as_str(&self) -> &str {
        match self {
            Facet::All => "all",
            Facet::Only(value) => value,
        }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        Facet::parse(value)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active year/type/search selections
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub year: Facet,
    pub kind: Facet,
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: impl Into<Facet>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<Facet>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// All three selections at their defaults
    pub fn is_default(&self) -> bool {
        self.year.is_all() && self.kind.is_all() && self.search.is_empty()
    }

    /// Put every selection back to its default in one step
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, publication: &Publication, haystack: &str, needle: &str) -> bool {
        self.year.matches(&publication.year.to_string())
            && self.kind.matches(publication.kind.as_str())
            && (needle.is_empty() || haystack.contains(needle))
    }
}

/// Publications of one year, in their original relative order
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub publications: Vec<&'a Publication>,
}

/// Group records by year, newest first, keeping order within a year
pub fn group_by_year<'a>(
    publications: impl IntoIterator<Item = &'a Publication>,
) -> Vec<YearGroup<'a>> {
    let mut by_year: BTreeMap<Reverse<i32>, Vec<&'a Publication>> = BTreeMap::new();
    for publication in publications {
        by_year
            .entry(Reverse(publication.year))
            .or_default()
            .push(publication);
    }
    by_year
        .into_iter()
        .map(|(Reverse(year), publications)| YearGroup { year, publications })
        .collect()
}

/// The full publication set with precomputed search text
#[derive(Debug, Clone)]
pub struct PublicationIndex {
    records: Vec<Publication>,
    haystacks: Vec<String>,
}

impl PublicationIndex {
    pub fn new(records: Vec<Publication>) -> Self {
        let haystacks = records.iter().map(Publication::search_text).collect();
        Self { records, haystacks }
    }

    pub fn records(&self) -> &[Publication] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &PublicationId) -> Option<&Publication> {
        self.records.iter().find(|p| &p.id == id)
    }

    /// Records passing every predicate, in original order
    pub fn filtered(&self, state: &FilterState) -> Vec<&Publication> {
        let needle = state.search.to_lowercase();
        self.records
            .iter()
            .zip(&self.haystacks)
            .filter(|(publication, haystack)| state.matches(publication, haystack, &needle))
            .map(|(publication, _)| publication)
            .collect()
    }

    pub fn count(&self, state: &FilterState) -> usize {
        self.filtered(state).len()
    }

    /// Filtered records grouped by year, newest first
    pub fn grouped(&self, state: &FilterState) -> Vec<YearGroup<'_>> {
        group_by_year(self.filtered(state))
    }

    /// Featured records, surfaced only while no filter is active
    pub fn featured(&self, state: &FilterState) -> Vec<&Publication> {
        if !state.is_default() {
            return Vec::new();
        }
        self.records.iter().filter(|p| p.featured).collect()
    }

    /// Distinct years, newest first
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|p| p.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Distinct types in order of first appearance
    pub fn types(&self) -> Vec<&PublicationType> {
        let mut types: Vec<&PublicationType> = Vec::new();
        for publication in &self.records {
            if !types.contains(&&publication.kind) {
                types.push(&publication.kind);
            }
        }
        types
    }
}
