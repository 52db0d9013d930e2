//! Data-quality checks for loaded records
//!
//! Nothing here rejects a record. Issues are reported so the loader can log
//! them while the section still renders.

use super::{parse_year_month, Project, Publication, TimelineEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Severity of a validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Warning,
    Info,
}

/// A data-quality finding on one record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Identifier of the record, or its position when it has none
    pub record: String,
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    fn warning(record: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            record: record.to_string(),
            field: field.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }

    fn info(record: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            record: record.to_string(),
            field: field.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Info,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.record, self.field, self.message)
    }
}

/// Validate one publication
pub fn validate_publication(publication: &Publication) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let id = publication.id.as_str();

    if id.is_empty() {
        issues.push(ValidationIssue::warning(id, "id", "Identifier is empty"));
    }

    if publication.title.trim().is_empty() {
        issues.push(ValidationIssue::warning(id, "title", "Title is empty"));
    }

    if !(1000..=9999).contains(&publication.year) {
        issues.push(ValidationIssue::warning(
            id,
            "year",
            format!("Year {} is not a 4-digit year", publication.year),
        ));
    }

    if !publication.kind.is_known() {
        issues.push(ValidationIssue::info(
            id,
            "type",
            format!("Unrecognized publication type '{}'", publication.kind),
        ));
    }

    if publication.bibtex.is_some() && !publication.has_valid_bibtex() {
        issues.push(ValidationIssue::warning(
            id,
            "bibtex",
            "BibTeX lacks '@' or '{'; citation will not be offered",
        ));
    }

    if let Some(ref doi) = publication.doi {
        if !doi.starts_with("10.") {
            issues.push(ValidationIssue::info(
                id,
                "doi",
                "DOI should start with '10.'",
            ));
        }
    }

    issues
}

/// Validate a whole publications document, including id uniqueness
pub fn validate_publications(publications: &[Publication]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for publication in publications {
        if !seen.insert(publication.id.as_str()) {
            issues.push(ValidationIssue::warning(
                publication.id.as_str(),
                "id",
                "Duplicate publication id",
            ));
        }
        issues.extend(validate_publication(publication));
    }

    issues
}

/// Validate a timeline entry. `index` names the record in reports.
pub fn validate_timeline_entry(index: usize, entry: &TimelineEntry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let record = format!("#{}", index);

    if !entry.is_consistent() {
        let message = if entry.current {
            "Marked current but has an end date"
        } else {
            "Not marked current but has no end date"
        };
        issues.push(ValidationIssue::warning(&record, "current", message));
    }

    if parse_year_month(&entry.start_date).is_none() {
        issues.push(ValidationIssue::warning(
            &record,
            "startDate",
            format!("'{}' is not YYYY-MM", entry.start_date),
        ));
    }

    if let Some(ref end) = entry.end_date {
        if parse_year_month(end).is_none() {
            issues.push(ValidationIssue::warning(
                &record,
                "endDate",
                format!("'{}' is not YYYY-MM", end),
            ));
        }
    }

    issues
}

/// Validate a project card
pub fn validate_project(project: &Project) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if project.title.trim().is_empty() {
        issues.push(ValidationIssue::warning(&project.id, "title", "Title is empty"));
    }

    if project.image.is_none() {
        issues.push(ValidationIssue::info(&project.id, "image", "No card image"));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PublicationType;

    #[test]
    fn clean_publication_has_no_issues() {
        let mut p = Publication::new("a", "Foo", PublicationType::Journal, 2023);
        p.bibtex = Some("@article{a, title={Foo}}".into());
        p.doi = Some("10.1000/xyz".into());
        assert!(validate_publication(&p).is_empty());
    }

    #[test]
    fn bad_year_and_bibtex_reported() {
        let mut p = Publication::new("a", "Foo", PublicationType::Journal, 23);
        p.bibtex = Some("no braces here".into());
        let fields: Vec<String> = validate_publication(&p)
            .into_iter()
            .map(|i| i.field)
            .collect();
        assert_eq!(fields, vec!["year", "bibtex"]);
    }

    #[test]
    fn duplicate_ids_reported_once_per_repeat() {
        let a = Publication::new("a", "Foo", PublicationType::Journal, 2023);
        let b = Publication::new("b", "Bar", PublicationType::Conference, 2024);
        let issues = validate_publications(&[a.clone(), b, a]);
        let dupes: Vec<_> = issues.iter().filter(|i| i.field == "id").collect();
        assert_eq!(dupes.len(), 1);
        assert_eq!(dupes[0].record, "a");
    }

    #[test]
    fn timeline_mismatch_is_a_warning() {
        let mut entry = TimelineEntry::new("Engineer", "Lab", "2024-01");
        entry.end_date = Some("2024-06".into());
        let issues = validate_timeline_entry(2, &entry);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].record, "#2");
        assert_eq!(issues[0].severity, ValidationSeverity::Warning);
        assert_eq!(issues[0].to_string(), "#2.current: Marked current but has an end date");
    }

    #[test]
    fn timeline_bad_dates() {
        let entry = TimelineEntry::new("Engineer", "Lab", "January").ended("2024/06");
        let fields: Vec<String> = validate_timeline_entry(0, &entry)
            .into_iter()
            .map(|i| i.field)
            .collect();
        assert_eq!(fields, vec!["startDate", "endDate"]);
    }
}
