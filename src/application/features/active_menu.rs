//! Highlight the navigation link for the current page.

use crate::application::ports::Document;
use crate::domain::path;
use crate::domain::selector::SelectorList;

pub const ACTIVE_CLASS: &str = "active";

/// Mark links pointing at the current path with `aria-current="page"` and
/// the active class, clearing both everywhere else. Returns how many links
/// matched.
///
/// Trailing slashes are ignored and `/index.html` equals `/`.
pub fn install(doc: &dyn Document, links: &SelectorList) -> usize {
    let current = doc.location_path();
    let mut active = 0;
    for link in doc.query_selector_all(links) {
        doc.remove_attribute(link, "aria-current");
        doc.remove_class(link, ACTIVE_CLASS);

        let matches = doc
            .attribute(link, "href")
            .is_some_and(|href| path::paths_match(&href, &current));
        if matches {
            doc.set_attribute(link, "aria-current", "page");
            doc.add_class(link, ACTIVE_CLASS);
            active += 1;
        }
    }
    active
}
