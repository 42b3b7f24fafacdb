use url::Url;
use web_sys::Element;

use crate::dom;

/// The path component of `link_href`, resolved against the page address.
/// Query and fragment are dropped.
pub fn link_path(page_href: &str, link_href: &str) -> Option<String> {
    let base = Url::parse(page_href).ok()?;
    let resolved = base.join(link_href).ok()?;
    Some(resolved.path().to_string())
}

pub fn is_active(current_path: &str, link_path: &str) -> bool {
    link_path == current_path || (current_path == "/" && link_path == "/")
}

/// Colors every link pointing at the current page. Links that do not match
/// are left as they are. Returns the number of links highlighted.
pub fn highlight_active(links: &[Element], page_href: &str, current_path: &str, color: &str) -> usize {
    let mut highlighted = 0;
    for link in links {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let Some(path) = link_path(page_href, &href) else {
            continue;
        };
        if is_active(current_path, &path) {
            dom::set_style(link, "color", color);
            highlighted += 1;
        }
    }
    highlighted
}
