use serde::Deserialize;

use crate::enhance::reveal::ObserverOptions;
use crate::enhance::tilt::TiltParams;

/// Selectors and styling knobs for the page enhancements.
///
/// Every field has a default matching the site's markup, so a host page only
/// needs to pass the keys it wants to override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    pub anchor_selector: String,
    pub reveal_selector: String,
    pub reveal_class: String,
    pub observer: ObserverOptions,
    pub nav_link_selector: String,
    pub active_color: String,
    pub tilt_selector: String,
    pub tilt: TiltParams,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            anchor_selector: r##"a[href^="#"]"##.to_string(),
            reveal_selector: ".feature-card, .step-card, .benefit-card, .stat-card, .impact-card"
                .to_string(),
            reveal_class: "animate-fade-in".to_string(),
            observer: ObserverOptions::default(),
            nav_link_selector: ".nav-link".to_string(),
            active_color: "var(--primary)".to_string(),
            tilt_selector: ".card-3d".to_string(),
            tilt: TiltParams::default(),
        }
    }
}

impl EnhancementConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EnhancementConfig::from_json(
            r#"{"reveal_class": "visible", "tilt": {"damping": 10.0}}"#,
        )
        .unwrap();

        assert_eq!(config.reveal_class, "visible");
        assert_eq!(config.tilt.damping, 10.0);
        assert_eq!(config.tilt.lift, 10.0);
        assert_eq!(config.nav_link_selector, ".nav-link");
        assert_eq!(config.observer, ObserverOptions::default());
    }

    #[test]
    fn empty_object_is_the_default_config() {
        assert_eq!(
            EnhancementConfig::from_json("{}").unwrap(),
            EnhancementConfig::default()
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(EnhancementConfig::from_json(r#"{"tilt": {"damping": "soft"}}"#).is_err());
    }
}
