//! Structured rich text
//!
//! The content API delivers post bodies as an ordered list of typed
//! text nodes rather than markup. Two operations cover every use in
//! the crate: flattening to plain text for word counting, and rendering
//! to markup fragments for the page.

use serde::{Deserialize, Serialize};

/// One node of a rich-text document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    /// Node kind as named by the API (`paragraph`, `heading2`,
    /// `list-item`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Plain text carried by the node
    #[serde(default)]
    pub text: String,
}

/// A rich-text document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<TextNode>);

impl RichText {
    /// Build a single-paragraph document
    pub fn paragraph(text: &str) -> Self {
        Self(vec![TextNode {
            kind: "paragraph".to_string(),
            text: text.to_string(),
        }])
    }

    /// Flatten the document to plain text
    ///
    /// Node texts are joined with a single space; nodes without text
    /// contribute nothing, so a malformed document flattens to an empty
    /// string instead of failing.
    pub fn as_text(&self) -> String {
        let parts: Vec<&str> = self
            .0
            .iter()
            .map(|node| node.text.as_str())
            .filter(|text| !text.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Render the document to markup
    ///
    /// Headings map to `<h1>`..`<h6>`, consecutive list items are
    /// grouped under one list element, and unknown kinds fall back to
    /// paragraphs. Text is escaped.
    pub fn as_html(&self) -> String {
        let mut html = String::new();
        let mut open_list: Option<&str> = None;

        for node in &self.0 {
            let list_tag = match node.kind.as_str() {
                "list-item" => Some("ul"),
                "o-list-item" => Some("ol"),
                _ => None,
            };

            if list_tag != open_list {
                if let Some(tag) = open_list {
                    html.push_str(&format!("</{}>", tag));
                }
                if let Some(tag) = list_tag {
                    html.push_str(&format!("<{}>", tag));
                }
                open_list = list_tag;
            }

            let text = escape_html(&node.text);
            match node.kind.as_str() {
                kind if kind.starts_with("heading") => {
                    let level = kind
                        .strip_prefix("heading")
                        .and_then(|n| n.parse::<u8>().ok())
                        .unwrap_or(2)
                        .clamp(1, 6);
                    html.push_str(&format!("<h{}>{}</h{}>", level, text, level));
                }
                "preformatted" => {
                    html.push_str(&format!("<pre>{}</pre>", text));
                }
                "list-item" | "o-list-item" => {
                    html.push_str(&format!("<li>{}</li>", text));
                }
                _ => {
                    html.push_str(&format!("<p>{}</p>", text));
                }
            }
        }

        if let Some(tag) = open_list {
            html.push_str(&format!("</{}>", tag));
        }

        html
    }
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
