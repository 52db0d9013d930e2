//! Project card model

use serde::{Deserialize, Serialize};

/// External links shown on a project card
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectLinks {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub paper: Option<String>,
    #[serde(default)]
    pub huggingface: Option<String>,
}

impl ProjectLinks {
    /// Present links as (label, href) in display order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", self.github.as_deref()),
            ("Demo", self.demo.as_deref()),
            ("Paper", self.paper.as_deref()),
            ("Hugging Face", self.huggingface.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, href)| href.filter(|h| !h.is_empty()).map(|h| (label, h)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// A portfolio project
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
    #[serde(default)]
    pub details_page: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            featured: false,
            image: None,
            short_description: String::new(),
            technologies: Vec::new(),
            links: ProjectLinks::default(),
            details_page: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_skip_missing_and_empty() {
        let links = ProjectLinks {
            github: Some("https://github.com/x/y".into()),
            demo: Some(String::new()),
            paper: None,
            huggingface: Some("https://huggingface.co/x".into()),
        };
        assert_eq!(
            links.entries(),
            vec![
                ("GitHub", "https://github.com/x/y"),
                ("Hugging Face", "https://huggingface.co/x")
            ]
        );
        assert!(ProjectLinks::default().is_empty());
    }

    #[test]
    fn deserialize_project() {
        let project: Project = serde_json::from_str(
            r#"{
                "id": "arabic-asr",
                "title": "Arabic ASR",
                "category": "nlp",
                "featured": true,
                "image": "img/asr.png",
                "shortDescription": "Speech recognition for dialects",
                "technologies": ["PyTorch"],
                "links": {"github": "https://github.com/x/asr"},
                "detailsPage": "projects/asr.html"
            }"#,
        )
        .unwrap();
        assert!(project.featured);
        assert_eq!(project.details_page.as_deref(), Some("projects/asr.html"));
        assert_eq!(project.links.entries().len(), 1);
    }
}
