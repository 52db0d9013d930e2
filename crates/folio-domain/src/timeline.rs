//! Timeline entries (education, experience, volunteering)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which timeline section an entry belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Education,
    Experience,
    Volunteering,
}

impl TimelineKind {
    pub const ALL: [TimelineKind; 3] = [
        TimelineKind::Education,
        TimelineKind::Experience,
        TimelineKind::Volunteering,
    ];

    /// Logical name of the data document holding this timeline
    pub fn document(&self) -> &'static str {
        match self {
            TimelineKind::Education => "education",
            TimelineKind::Experience => "experience",
            TimelineKind::Volunteering => "volunteering",
        }
    }

    /// Mount point id the rendered timeline is written into
    pub fn container_id(&self) -> &'static str {
        match self {
            TimelineKind::Education => "education-timeline",
            TimelineKind::Experience => "experience-timeline",
            TimelineKind::Volunteering => "volunteering-timeline",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            TimelineKind::Education => "Education",
            TimelineKind::Experience => "Experience",
            TimelineKind::Volunteering => "Volunteering",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "education" => Some(TimelineKind::Education),
            "experience" => Some(TimelineKind::Experience),
            "volunteering" => Some(TimelineKind::Volunteering),
            _ => None,
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.document())
    }
}

/// One position, degree or volunteering role.
///
/// Education documents use `degree`/`institution`; the others use
/// `position`/`organization`. Both spellings land in the same fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(alias = "degree")]
    pub position: String,
    #[serde(alias = "institution")]
    pub organization: String,
    #[serde(default)]
    pub location: String,
    /// `YYYY-MM`
    pub start_date: String,
    /// `YYYY-MM`, absent while the entry is current
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl TimelineEntry {
    pub fn new(
        position: impl Into<String>,
        organization: impl Into<String>,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            position: position.into(),
            organization: organization.into(),
            location: String::new(),
            start_date: start_date.into(),
            end_date: None,
            current: true,
            logo: None,
            description: None,
            responsibilities: Vec::new(),
            technologies: Vec::new(),
        }
    }

    /// Builder method to close the entry at `end_date`
    pub fn ended(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self.current = false;
        self
    }

    /// Whether the flag and the end date agree (`current` iff no end date)
    pub fn is_consistent(&self) -> bool {
        self.current == self.end_date.is_none()
    }

    /// Display range such as "Sep 2019 - Jun 2023" or "Jan 2024 - Present".
    ///
    /// The explicit `current` flag wins over a stale end date.
    pub fn date_range(&self) -> String {
        let start = format_year_month(&self.start_date);
        match (&self.end_date, self.current) {
            (_, true) | (None, _) => format!("{} - Present", start),
            (Some(end), false) => format!("{} - {}", start, format_year_month(end)),
        }
    }
}

/// Parse a `YYYY-MM` date
pub fn parse_year_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()
}

/// Format `YYYY-MM` as "Mon YYYY", passing unparseable values through
pub fn format_year_month(value: &str) -> String {
    match parse_year_month(value) {
        Some(date) => date.format("%b %Y").to_string(),
        None => value.to_string(),
    }
}
