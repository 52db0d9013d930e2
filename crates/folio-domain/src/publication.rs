//! Publication domain model

use super::Author;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a publication, unique within the publications document
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationId(String);

impl PublicationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PublicationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of venue a publication appeared in.
///
/// Values outside the known set are kept verbatim so a typo in one record
/// does not fail the whole document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PublicationType {
    Journal,
    Conference,
    Workshop,
    Preprint,
    Other(String),
}

impl PublicationType {
    pub fn as_str(&self) -> &str {
        match self {
            PublicationType::Journal => "journal",
            PublicationType::Conference => "conference",
            PublicationType::Workshop => "workshop",
            PublicationType::Preprint => "preprint",
            PublicationType::Other(s) => s,
        }
    }

    /// Human-readable label for filter controls and badges
    pub fn label(&self) -> &str {
        match self {
            PublicationType::Journal => "Journal",
            PublicationType::Conference => "Conference",
            PublicationType::Workshop => "Workshop",
            PublicationType::Preprint => "Preprint",
            PublicationType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PublicationType::Other(_))
    }
}

impl From<String> for PublicationType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "journal" => PublicationType::Journal,
            "conference" => PublicationType::Conference,
            "workshop" => PublicationType::Workshop,
            "preprint" => PublicationType::Preprint,
            _ => PublicationType::Other(s),
        }
    }
}

impl From<PublicationType> for String {
    fn from(t: PublicationType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A publication as stored in the publications document
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: PublicationId,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub venue_short: Option<String>,
    #[serde(rename = "type")]
    pub kind: PublicationType,
    pub year: i32,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub bibtex: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
}

impl Publication {
    /// Create a publication with required fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: PublicationType,
        year: i32,
    ) -> Self {
        Self {
            id: PublicationId::new(id),
            title: title.into(),
            authors: Vec::new(),
            venue: String::new(),
            venue_short: None,
            kind,
            year,
            doi: None,
            url: None,
            pdf_url: None,
            bibtex: None,
            keywords: Vec::new(),
            featured: false,
            abstract_text: None,
        }
    }

    /// The BibTeX text, if present and structurally plausible
    pub fn citation(&self) -> Option<&str> {
        self.bibtex.as_deref().filter(|b| is_valid_bibtex(b))
    }

    pub fn has_valid_bibtex(&self) -> bool {
        self.citation().is_some()
    }

    /// Lowercased text the free-text search matches against:
    /// title, venue, abstract, keywords and author names.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.venue.len() + 64);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.venue);
        if let Some(abstract_text) = &self.abstract_text {
            text.push(' ');
            text.push_str(abstract_text);
        }
        for keyword in &self.keywords {
            text.push(' ');
            text.push_str(keyword);
        }
        for author in &self.authors {
            text.push(' ');
            text.push_str(&author.name);
        }
        text.to_lowercase()
    }
}

/// A citation is only offered when the text has an `@` and a `{`
pub fn is_valid_bibtex(bibtex: &str) -> bool {
    bibtex.contains('@') && bibtex.contains('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "smith2024",
            "title": "Vision Transformers at Scale",
            "authors": [{"name": "J. Smith"}, {"name": "M. Al", "isMe": true}],
            "venue": "Conference on Vision",
            "venueShort": "CV",
            "type": "conference",
            "year": 2024,
            "pdfUrl": "papers/smith2024.pdf",
            "bibtex": "@inproceedings{smith2024, title={Vision}}",
            "keywords": ["vision", "transformers"],
            "featured": true
        }"#
    }

    #[test]
    fn deserialize_camel_case_fields() {
        let p: Publication = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(p.id.as_str(), "smith2024");
        assert_eq!(p.kind, PublicationType::Conference);
        assert_eq!(p.venue_short.as_deref(), Some("CV"));
        assert_eq!(p.pdf_url.as_deref(), Some("papers/smith2024.pdf"));
        assert!(p.authors[1].is_me);
        assert!(p.featured);
        assert!(p.doi.is_none());
    }

    #[test]
    fn minimal_record_uses_defaults() {
        let p: Publication = serde_json::from_str(
            r#"{"id": "a", "title": "Foo", "type": "journal", "year": 2023}"#,
        )
        .unwrap();
        assert!(p.authors.is_empty());
        assert!(p.keywords.is_empty());
        assert!(!p.featured);
        assert!(!p.has_valid_bibtex());
    }

    #[test]
    fn unknown_type_is_kept() {
        let p: Publication = serde_json::from_str(
            r#"{"id": "t", "title": "Thesis", "type": "thesis", "year": 2020}"#,
        )
        .unwrap();
        assert_eq!(p.kind, PublicationType::Other("thesis".into()));
        assert_eq!(p.kind.as_str(), "thesis");
        assert!(!p.kind.is_known());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "thesis");
    }

    #[test]
    fn bibtex_validity() {
        assert!(is_valid_bibtex("@article{a, title={T}}"));
        assert!(!is_valid_bibtex("article{a}"));
        assert!(!is_valid_bibtex("@article"));
        assert!(!is_valid_bibtex(""));

        let mut p = Publication::new("a", "T", PublicationType::Journal, 2023);
        p.bibtex = Some("not a citation".into());
        assert!(p.citation().is_none());
        p.bibtex = Some("@misc{a,}".into());
        assert_eq!(p.citation(), Some("@misc{a,}"));
    }

    #[test]
    fn search_text_covers_keywords_and_authors() {
        let p: Publication = serde_json::from_str(sample_json()).unwrap();
        let text = p.search_text();
        assert!(text.contains("vision transformers at scale"));
        assert!(text.contains("conference on vision"));
        assert!(text.contains("transformers"));
        assert!(text.contains("j. smith"));
        assert!(!text.contains("papers/"));
    }
}
