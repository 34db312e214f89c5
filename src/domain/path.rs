//! URL path helpers for anchor rewriting and active-link detection.

/// Whether `path` is the site's homepage.
pub fn is_homepage(path: &str) -> bool {
    path == "/" || path == "/index.html" || path.ends_with("/index.html")
}

/// Whether `href` points at a fragment on the current page.
///
/// Bare `#` and the `#!` placeholder are not real anchors.
pub fn is_in_page_anchor(href: &str) -> bool {
    href.starts_with('#') && href != "#" && href != "#!"
}

/// Rewrite an in-page anchor so it resolves against the homepage.
///
/// Returns `None` when `href` is not an in-page anchor.
pub fn homepage_anchor(href: &str) -> Option<String> {
    is_in_page_anchor(href).then(|| format!("/{href}"))
}

/// Fragment id of an in-page anchor.
pub fn fragment_id(href: &str) -> Option<&str> {
    if is_in_page_anchor(href) {
        Some(&href[1..])
    } else {
        None
    }
}

/// Normalize a path for comparison: trailing slashes are insignificant and
/// `/index.html` is the root.
pub fn normalize(path: &str) -> &str {
    if path == "/index.html" {
        return "/";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Whether a navigation link's `href` points at the current path.
pub fn paths_match(href: &str, current: &str) -> bool {
    normalize(href) == normalize(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homepage_detection() {
        assert!(is_homepage("/"));
        assert!(is_homepage("/index.html"));
        assert!(is_homepage("/nl/index.html"));
        assert!(!is_homepage("/about"));
        assert!(!is_homepage("/index.htm"));
    }

    #[test]
    fn test_in_page_anchor() {
        assert!(is_in_page_anchor("#contact"));
        assert!(!is_in_page_anchor("#"));
        assert!(!is_in_page_anchor("#!"));
        assert!(!is_in_page_anchor("/#contact"));
        assert_eq!(fragment_id("#contact"), Some("contact"));
        assert_eq!(fragment_id("/about"), None);
    }

    #[test]
    fn test_homepage_anchor() {
        assert_eq!(homepage_anchor("#team"), Some("/#team".to_owned()));
        assert_eq!(homepage_anchor("#"), None);
    }

    #[test]
    fn test_paths_match_ignores_trailing_slash() {
        assert!(paths_match("/about", "/about/"));
        assert!(paths_match("/about/", "/about"));
        assert!(paths_match("/about", "/about"));
        assert!(!paths_match("/about", "/contact"));
        assert!(!paths_match("/about-us", "/about"));
    }

    #[test]
    fn test_root_and_index_are_equivalent() {
        assert!(paths_match("/", "/index.html"));
        assert!(paths_match("/index.html", "/"));
        assert!(paths_match("/", "/"));
        assert!(paths_match("/", "//"));
        assert!(!paths_match("/", "/about"));
    }
}
