use gloo_events::EventListener;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TiltParams {
    /// Pixels of pointer offset per degree of rotation.
    pub damping: f64,
    /// Depth translation while hovered, in px.
    pub lift: f64,
    pub perspective: f64,
}

impl Default for TiltParams {
    fn default() -> Self {
        Self {
            damping: 20.0,
            lift: 10.0,
            perspective: 1000.0,
        }
    }
}

/// A card's bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CardRect {
    pub fn of(element: &Element) -> Self {
        let rect = element.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub translate_z: f64,
}

impl Tilt {
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        translate_z: 0.0,
    };

    /// Pointer below center tips the top edge away; pointer right of center
    /// pushes the right edge back.
    pub fn from_pointer(rect: CardRect, client_x: f64, client_y: f64, params: &TiltParams) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;

        Self {
            rotate_x: (y - center_y) / params.damping,
            rotate_y: (center_x - x) / params.damping,
            translate_z: params.lift,
        }
    }

    pub fn transform(&self, perspective: f64) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
            perspective, self.rotate_x, self.rotate_y, self.translate_z
        )
    }
}

/// Pointer listeners for a group of tilt cards. Dropping it detaches them.
pub struct TiltCards {
    listeners: Vec<EventListener>,
}

impl TiltCards {
    pub fn attach(cards: &[Element], params: TiltParams) -> Self {
        let mut listeners = Vec::with_capacity(cards.len() * 2);

        for card in cards {
            let target = card.clone();
            listeners.push(EventListener::new(card, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let tilt = Tilt::from_pointer(
                    CardRect::of(&target),
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    &params,
                );
                dom::set_style(&target, "transform", &tilt.transform(params.perspective));
            }));

            let target = card.clone();
            listeners.push(EventListener::new(card, "mouseleave", move |_| {
                dom::set_style(&target, "transform", &Tilt::NEUTRAL.transform(params.perspective));
            }));
        }

        Self { listeners }
    }

    pub fn len(&self) -> usize {
        self.listeners.len() / 2
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

    const CARD: CardRect = CardRect {
        left: 40.0,
        top: 300.0,
        width: 200.0,
        height: 100.0,
    };

    fn at(x: f64, y: f64) -> Tilt {
        Tilt::from_pointer(CARD, CARD.left + x, CARD.top + y, &TiltParams::default())
    }

    #[test]
    fn center_is_flat() {
        let tilt = at(100.0, 50.0);
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.translate_z, 10.0);
    }

    #[test]
    fn top_left_corner_is_the_extreme_for_that_corner() {
        let corner = at(0.0, 0.0);
        assert_eq!(corner.rotate_x, -2.5);
        assert_eq!(corner.rotate_y, 5.0);

        for (x, y) in [(10.0, 0.0), (0.0, 10.0), (50.0, 25.0), (99.0, 49.0)] {
            let inner = at(x, y);
            assert!(inner.rotate_x.abs() <= corner.rotate_x.abs());
            assert!(inner.rotate_y.abs() <= corner.rotate_y.abs());
        }
    }

    #[test]
    fn sign_follows_pointer_side() {
        let below_right = at(200.0, 100.0);
        assert_eq!(below_right.rotate_x, 2.5);
        assert_eq!(below_right.rotate_y, -5.0);
    }

    #[test]
    fn damping_scales_rotation() {
        let params = TiltParams {
            damping: 10.0,
            ..TiltParams::default()
        };
        let tilt = Tilt::from_pointer(CARD, CARD.left, CARD.top, &params);
        assert_eq!(tilt.rotate_x, -5.0);
        assert_eq!(tilt.rotate_y, 10.0);
    }

    #[test]
    fn transform_strings() {
        assert_eq!(
            at(0.0, 0.0).transform(1000.0),
            "perspective(1000px) rotateX(-2.5deg) rotateY(5deg) translateZ(10px)"
        );
        assert_eq!(
            Tilt::NEUTRAL.transform(1000.0),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) translateZ(0px)"
        );
    }
}
