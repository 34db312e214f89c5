//! Point the site logo at the homepage.

use crate::application::ports::Document;
use crate::domain::selector::SelectorList;

/// Set `href` on the first logo element if it is a link. Returns whether it
/// was updated.
pub fn install(doc: &dyn Document, logo: &SelectorList, href: &str) -> bool {
    match doc.query_selector(logo) {
        Some(link) if doc.tag_name(link).as_deref() == Some("a") => {
            doc.set_attribute(link, "href", href);
            true
        }
        _ => false,
    }
}
