//! Writing integrity hashes into article markup.

use log::warn;

use crate::canonical::Container;
use crate::digest::IntegrityHash;
use crate::html::{self, Element};

/// Default attribute carrying the integrity hash.
pub const DEFAULT_HASH_ATTRIBUTE: &str = "data-hash";

/// Set `attribute="<hash>"` on the container's opening tag.
///
/// An existing attribute of that name is replaced in place. Otherwise the
/// attribute is appended after the tag's last attribute (or straight after
/// the tag name). Every other byte of the document is kept.
pub fn embed_hash(doc: &str, container: &Container, attribute: &str, hash: &IntegrityHash) -> String {
    let element = container.element;
    let rendered = format!("{attribute}=\"{hash}\"");
    let attrs = element.attributes(doc);

    let (at, replace_to, insert) = match attrs
        .iter()
        .find(|a| doc[a.name.clone()].eq_ignore_ascii_case(attribute))
    {
        Some(existing) => (existing.span.start, existing.span.end, rendered),
        None => {
            let at = attrs.last().map_or(element.name_end, |a| a.span.end);
            (at, at, format!(" {rendered}"))
        }
    };

    let mut out = String::with_capacity(doc.len() + insert.len());
    out.push_str(&doc[..at]);
    out.push_str(&insert);
    out.push_str(&doc[replace_to..]);
    out
}

/// The hash currently published on the container, if any.
pub fn published_hash<'a>(doc: &'a str, container: &Container, attribute: &str) -> Option<&'a str> {
    container
        .element
        .attribute(doc, attribute)
        .and_then(|a| a.value.map(|v| &doc[v]))
}

/// Remove every element whose `class` lists one of `classes`.
///
/// These are the explanatory integrity footers and boxes that predate the
/// header-embedded hash. A marked element that encloses `container` is
/// kept with a warning; marked elements inside it are still removed. Void and self-closing
/// marked tags are removed as single tags.
///
/// Returns the rewritten document and the number of blocks removed.
pub fn strip_legacy_blocks(doc: &str, classes: &[String], container: &Element) -> (String, usize) {
    if classes.is_empty() {
        return (doc.to_string(), 0);
    }
    html::remove_elements_except(
        doc,
        |tag| classes.iter().any(|class| html::has_class(doc, tag, class)),
        |block| {
            let wraps = block.encloses(container);
            if wraps {
                warn!(
                    "Keeping legacy integrity block at byte {}: it wraps the content container",
                    block.start
                );
            }
            wraps
        },
    )
}
