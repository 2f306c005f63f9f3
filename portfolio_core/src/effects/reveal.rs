use crate::config::SiteConfig;
use crate::traits::ElementHandle;


/// Fades elements in the first time they scroll into view.
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    pub threshold: f64,
    revealed_class: String,
}

impl Reveal {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            threshold: config.reveal.threshold,
            revealed_class: config.classes.revealed.clone(),
        }
    }

    /// Handle one intersection report. Returns `true` once the element is
    /// revealed and no longer needs watching.
    pub fn on_intersection<E: ElementHandle>(&self, element: &E, intersecting: bool) -> bool {
        if !intersecting {
            return false;
        }
        if !element.has_class(&self.revealed_class) {
            element.set_class(&self.revealed_class, true);
        }
        true
    }
}
