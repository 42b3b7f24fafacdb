use yew::prelude::*;

use crate::config::EnhancementConfig;
use crate::dom;
use crate::Enhancements;

/// Installs the page enhancements when the calling component mounts and
/// detaches them when it unmounts.
#[hook]
pub fn use_enhancements(config: EnhancementConfig) {
    use_effect_with_deps(
        move |_| {
            let installed = dom::document().and_then(|document| Enhancements::install(&document, &config));
            let installed = match installed {
                Ok(enhancements) => Some(enhancements),
                Err(e) => {
                    log::error!("failed to enhance page: {}", e);
                    None
                }
            };
            move || {
                if let Some(enhancements) = installed {
                    enhancements.detach();
                }
            }
        },
        (), // Install once per mount
    );
}
