use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::EnhanceError;

/// Whether an element's entrance animation has played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Unanimated,
    Animated,
}

impl AnimationState {
    pub fn from_marker(has_marker: bool) -> Self {
        if has_marker {
            Self::Animated
        } else {
            Self::Unanimated
        }
    }

    /// `Animated` is absorbing: leaving the viewport never reverts it.
    pub fn advance(self, is_intersecting: bool) -> Self {
        match self {
            Self::Unanimated if is_intersecting => Self::Animated,
            state => state,
        }
    }
}

/// Something that carries the animation marker.
pub trait Revealable {
    fn has_marker(&self, marker: &str) -> bool;
    fn add_marker(&self, marker: &str);

    fn animation_state(&self, marker: &str) -> AnimationState {
        AnimationState::from_marker(self.has_marker(marker))
    }
}

impl Revealable for Element {
    fn has_marker(&self, marker: &str) -> bool {
        self.class_list().contains(marker)
    }

    fn add_marker(&self, marker: &str) {
        if let Err(e) = self.class_list().add_1(marker) {
            log::debug!("failed to add class {:?}: {:?}", marker, e);
        }
    }
}

/// Applies one intersection change. Returns true when the element moved
/// from `Unanimated` to `Animated`.
pub fn reveal_one<R: Revealable + ?Sized>(target: &R, is_intersecting: bool, marker: &str) -> bool {
    let before = target.animation_state(marker);
    let after = before.advance(is_intersecting);
    if before == after {
        return false;
    }
    target.add_marker(marker);
    true
}

/// Applies a batch of `(is_intersecting, target)` changes. `on_animated` runs
/// for each target that was newly animated; returns how many there were.
pub fn apply_entries<'a, R, I, F>(entries: I, marker: &str, mut on_animated: F) -> usize
where
    R: Revealable + ?Sized + 'a,
    I: IntoIterator<Item = (bool, &'a R)>,
    F: FnMut(&R),
{
    let mut animated = 0;
    for (is_intersecting, target) in entries {
        if reveal_one(target, is_intersecting, marker) {
            on_animated(target);
            animated += 1;
        }
    }
    animated
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An intersection observer over a fixed element group. Dropping it
/// disconnects the observer.
pub struct Reveal {
    observer: IntersectionObserver,
    callback: Option<EntriesCallback>,
}

impl Reveal {
    pub fn observe(
        elements: &[Element],
        marker: &str,
        options: &ObserverOptions,
    ) -> Result<Self, EnhanceError> {
        let marker = marker.to_string();
        let callback: EntriesCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            let entries: Vec<(bool, Element)> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| (entry.is_intersecting(), entry.target()))
                .collect();
            // Nothing left to do for an animated element.
            apply_entries(
                entries.iter().map(|(is_intersecting, target)| (*is_intersecting, target)),
                &marker,
                |target: &Element| observer.unobserve(target),
            );
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| EnhanceError::Observer(format!("{:?}", e)))?;

        for element in elements {
            observer.observe(element);
        }
        log::debug!("observing {} elements for entrance animation", elements.len());

        Ok(Self {
            observer,
            callback: Some(callback),
        })
    }

    /// Keeps the observer running for the lifetime of the page.
    pub fn persist(mut self) {
        if let Some(callback) = self.callback.take() {
            callback.forget();
        }
        std::mem::forget(self);
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
