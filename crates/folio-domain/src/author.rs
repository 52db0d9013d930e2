//! Author representation

use serde::{Deserialize, Serialize};

/// An author in a publication byline
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    /// Set for the portfolio owner so the byline can highlight them
    #[serde(default)]
    pub is_me: bool,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_me: false,
        }
    }

    /// Author entry for the portfolio owner
    pub fn me(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_me: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_defaults_is_me() {
        let author: Author = serde_json::from_str(r#"{"name": "Ada Lovelace"}"#).unwrap();
        assert_eq!(author, Author::new("Ada Lovelace"));

        let me: Author = serde_json::from_str(r#"{"name": "M. Al", "isMe": true}"#).unwrap();
        assert!(me.is_me);
    }
}
