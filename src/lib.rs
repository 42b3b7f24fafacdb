use gloo_events::EventListener;
use log::{info, Level};
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod hooks;
pub mod enhance {
    pub mod anchor_scroll;
    pub mod nav_highlight;
    pub mod reveal;
    pub mod tilt;
}

use config::EnhancementConfig;
use enhance::{
    anchor_scroll::AnchorScroll,
    nav_highlight,
    reveal::Reveal,
    tilt::TiltCards,
};
use error::EnhanceError;

pub use api::{make_api_call, Method};

/// The listener groups installed on one document. Each group detaches when
/// dropped.
pub struct Enhancements {
    anchors: Option<AnchorScroll>,
    reveal: Option<Reveal>,
    tilt: Option<TiltCards>,
    highlighted: usize,
}

impl Enhancements {
    pub fn install(document: &Document, config: &EnhancementConfig) -> Result<Self, EnhanceError> {
        let window = dom::window()?;
        let location = window.location();
        let page_href = location.href().unwrap_or_default();
        let current_path = location.pathname().unwrap_or_else(|_| "/".to_string());

        let links = dom::query_all(document, &config.anchor_selector);
        let anchors = AnchorScroll::attach(document, &links);

        let animated = dom::query_all(document, &config.reveal_selector);
        let reveal = Reveal::observe(&animated, &config.reveal_class, &config.observer)?;

        let nav_links = dom::query_all(document, &config.nav_link_selector);
        let highlighted = nav_highlight::highlight_active(
            &nav_links,
            &page_href,
            &current_path,
            &config.active_color,
        );

        let cards = dom::query_all(document, &config.tilt_selector);
        let tilt = TiltCards::attach(&cards, config.tilt);

        info!(
            "enhanced {}: {} anchors, {} animated, {}/{} nav links active, {} tilt cards",
            current_path,
            anchors.len(),
            animated.len(),
            highlighted,
            nav_links.len(),
            tilt.len()
        );

        Ok(Self {
            anchors: Some(anchors),
            reveal: Some(reveal),
            tilt: Some(tilt),
            highlighted,
        })
    }

    /// Number of navigation links highlighted at install time.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn detach_anchors(&mut self) {
        self.anchors.take();
    }

    pub fn detach_reveal(&mut self) {
        self.reveal.take();
    }

    pub fn detach_tilt(&mut self) {
        self.tilt.take();
    }

    pub fn detach(self) {}

    /// Leaves every remaining group attached until the page goes away.
    pub fn persist(self) {
        let Self { anchors, reveal, tilt, .. } = self;
        if let Some(anchors) = anchors {
            anchors.persist();
        }
        if let Some(reveal) = reveal {
            reveal.persist();
        }
        if let Some(tilt) = tilt {
            tilt.persist();
        }
    }
}

// Runs `f` now if the DOM is parsed, otherwise on DOMContentLoaded.
fn when_ready(document: &Document, f: impl FnOnce(&Document) + 'static) {
    if document.ready_state() != "loading" {
        f(document);
        return;
    }
    let doc = document.clone();
    EventListener::once(document, "DOMContentLoaded", move |_| f(&doc)).forget();
}

fn enhance_page(config: EnhancementConfig) -> Result<(), EnhanceError> {
    let document = dom::document()?;
    when_ready(&document, move |document| {
        match Enhancements::install(document, &config) {
            Ok(enhancements) => enhancements.persist(),
            Err(e) => log::error!("failed to enhance page: {}", e),
        }
    });
    Ok(())
}

fn welcome() {
    gloo_console::log!(
        "%c🚀 SalesTech Copilot",
        "color: #4F46E5; font-size: 24px; font-weight: bold;"
    );
    gloo_console::log!(
        "%cEmpowering sales teams with AI-powered technical assistance",
        "color: #6B7280; font-size: 14px;"
    );
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Logging may already be set up by an embedding app
    let _ = console_log::init_with_level(Level::Info);

    welcome();
    if global_flag("SALESTECH_MANUAL_INIT") {
        info!("manual init requested, waiting for init_with_config");
        return Ok(());
    }
    enhance_page(EnhancementConfig::default())?;
    Ok(())
}

/// Installs the enhancements with a host-supplied config object. Missing keys
/// fall back to the defaults.
#[wasm_bindgen]
pub fn init_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: EnhancementConfig = if config.is_null() || config.is_undefined() {
        EnhancementConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| EnhanceError::Config(e.to_string()))?
    };
    enhance_page(config)?;
    Ok(())
}

fn global_flag(name: &str) -> bool {
    web_sys::js_sys::Reflect::get(&web_sys::js_sys::global(), &JsValue::from_str(name))
        .map(|v| v.is_truthy())
        .unwrap_or(false)
}
