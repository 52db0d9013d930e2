//! Escaped HTML fragments
//!
//! [`Markup`] can only be built from escaped text, from [`Element`]s (whose
//! tag and attribute names are static and whose attribute values are
//! escaped), or from other `Markup`. Record text therefore never reaches the
//! output unescaped.

use std::fmt;

/// Escape text for use in element content or a quoted attribute value
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep an href only if it is relative or uses a web/mail scheme
pub fn safe_href(href: &str) -> Option<&str> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            let scheme = scheme.to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto").then_some(trimmed)
        }
        _ => Some(trimmed),
    }
}

/// An HTML fragment that is safe to insert as-is
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Escaped text
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn push_text(&mut self, text: &str) {
        self.0.push_str(&escape(text));
    }

    pub fn push(&mut self, markup: impl Into<Markup>) {
        self.0.push_str(&markup.into().0);
    }

    pub fn concat(parts: impl IntoIterator<Item = Markup>) -> Self {
        let mut out = Self::new();
        for part in parts {
            out.0.push_str(&part.0);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builder for one element
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    body: Option<Markup>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            body: Some(Markup::new()),
        }
    }

    /// An element without content or closing tag (`img`, `input`)
    pub fn void(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            body: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.attrs.push((name, Some(value.as_ref().to_string())));
        self
    }

    pub fn attr_opt(self, name: &'static str, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute such as `hidden` or `selected`
    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        if on {
            self.attrs.push((name, None));
        }
        self
    }

    pub fn class(self, value: impl AsRef<str>) -> Self {
        self.attr("class", value)
    }

    /// Link to an external page in a new tab
    pub fn external(self) -> Self {
        self.attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
    }

    pub fn text(mut self, text: &str) -> Self {
        if let Some(body) = self.body.as_mut() {
            body.push_text(text);
        }
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        if let Some(body) = self.body.as_mut() {
            body.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        if let Some(body) = self.body.as_mut() {
            for child in children {
                body.push(child);
            }
        }
        self
    }

    pub fn render(self) -> Markup {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');
        if let Some(body) = self.body {
            out.push_str(body.as_str());
            out.push_str("</");
            out.push_str(self.tag);
            out.push('>');
        }
        Markup(out)
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        element.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn element_escapes_text_and_attributes() {
        let markup: Markup = Element::new("a")
            .attr("href", "/search?q=a&b")
            .attr("title", "\"quoted\"")
            .text("<script>")
            .into();
        assert_eq!(
            markup.as_str(),
            "<a href=\"/search?q=a&amp;b\" title=\"&quot;quoted&quot;\">&lt;script&gt;</a>"
        );
    }

    #[test]
    fn void_and_flag_attributes() {
        let img = Element::void("img")
            .attr("src", "logo.png")
            .flag("hidden", true)
            .flag("selected", false)
            .text("ignored")
            .render();
        assert_eq!(img.as_str(), "<img src=\"logo.png\" hidden>");
    }

    #[test]
    fn attr_opt_skips_none() {
        let none: Option<&str> = None;
        let div = Element::new("div").attr_opt("id", none).render();
        assert_eq!(div.as_str(), "<div></div>");
    }

    #[rstest]
    #[case("https://doi.org/10.1/x", Some("https://doi.org/10.1/x"))]
    #[case("papers/a.pdf", Some("papers/a.pdf"))]
    #[case("mailto:me@example.org", Some("mailto:me@example.org"))]
    #[case("javascript:alert(1)", None)]
    #[case(" JavaScript:alert(1)", None)]
    #[case("data:text/html,hi", None)]
    #[case("", None)]
    fn href_schemes(#[case] href: &str, #[case] expected: Option<&str>) {
        assert_eq!(safe_href(href), expected);
    }
}
