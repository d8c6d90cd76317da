//! Canonical content extraction.
//!
//! Canonical content is the plain text an integrity hash is computed over:
//! the editorial text inside the content container, with presentation
//! blocks removed, tags stripped, and whitespace normalized.

use std::fmt;

use crate::digest::IntegrityHash;
use crate::html::{self, Element};

/// Blocks that carry presentation or behavior rather than editorial text.
pub const NON_EDITORIAL_ELEMENTS: [&str; 3] = ["script", "style", "svg"];

/// Which element was used as the content container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// The primary `<article>` element.
    Article,
    /// The document `<body>`, used when there is no article.
    Body,
}

impl ContainerKind {
    /// Tag name of the container.
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// The element holding an article's editorial text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// Article or body.
    pub kind: ContainerKind,
    /// Offsets within the document.
    pub element: Element,
}

/// Locate the first `<article>` element, falling back to `<body>`.
pub fn locate_container(doc: &str) -> Option<Container> {
    [ContainerKind::Article, ContainerKind::Body]
        .into_iter()
        .find_map(|kind| {
            html::find_element(doc, kind.tag_name()).map(|element| Container { kind, element })
        })
}

/// Normalized text of a document's content container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalContent {
    text: String,
    container: Container,
}

impl CanonicalContent {
    /// Extract canonical content from a document.
    ///
    /// Returns `None` when the document has neither an `<article>` nor a
    /// `<body>` element.
    pub fn extract(doc: &str) -> Option<Self> {
        let container = locate_container(doc)?;
        let text = canonicalize_fragment(container.element.inner(doc));
        Some(Self { text, container })
    }

    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The container the text came from.
    pub fn container(&self) -> Container {
        self.container
    }

    /// SHA-256 of the normalized text.
    pub fn hash(&self) -> IntegrityHash {
        IntegrityHash::compute(&self.text)
    }
}

/// Turn a markup fragment into canonical text.
pub fn canonicalize_fragment(fragment: &str) -> String {
    let editorial = html::remove_elements(fragment, &NON_EDITORIAL_ELEMENTS);
    normalize_whitespace(&html::strip_tags(&editorial))
}

/// Collapse every run of whitespace into one space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
