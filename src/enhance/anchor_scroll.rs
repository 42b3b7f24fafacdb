use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// The selector for an in-page link target, if `href` is a fragment.
///
/// A bare `#` names no element and yields `None`.
pub fn fragment_selector(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}

/// Resolves `href` against `document` and smooth-scrolls the target to the
/// top of the viewport. Returns whether a target was found.
pub fn scroll_to_fragment(document: &Document, href: &str) -> bool {
    let Some(selector) = fragment_selector(href) else {
        return false;
    };
    // Fragments that are not valid selectors resolve to nothing.
    let Some(target) = document.query_selector(selector).ok().flatten() else {
        return false;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// Click listeners for a group of fragment links. Dropping it detaches them.
pub struct AnchorScroll {
    listeners: Vec<EventListener>,
}

impl AnchorScroll {
    pub fn attach(document: &Document, links: &[Element]) -> Self {
        let listeners = links
            .iter()
            .map(|link| {
                let document = document.clone();
                let link_for_click = link.clone();
                EventListener::new_with_options(
                    link,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        let href = link_for_click.get_attribute("href").unwrap_or_default();
                        if !scroll_to_fragment(&document, &href) {
                            log::debug!("no scroll target for {:?}", href);
                        }
                    },
                )
            })
            .collect();

        Self { listeners }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Keeps the listeners attached for the lifetime of the page.
    pub fn persist(self) {
        self.listeners.into_iter().for_each(EventListener::forget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_links_resolve_to_id_selectors() {
        assert_eq!(fragment_selector("#features"), Some("#features"));
        assert_eq!(fragment_selector("#how-it-works"), Some("#how-it-works"));
    }

    #[test]
    fn bare_hash_and_other_hrefs_are_ignored() {
        assert_eq!(fragment_selector("#"), None);
        assert_eq!(fragment_selector(""), None);
        assert_eq!(fragment_selector("/about#team"), None);
        assert_eq!(fragment_selector("https://example.com/#top"), None);
    }
}
