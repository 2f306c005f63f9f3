use anyhow::{anyhow, Result};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

use portfolio_core::SiteConfig;

use crate::dom::DomElement;

/// Id of an optional `<script type="application/json">` holding a `SiteConfig`.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

pub struct WasmContext {
    window: Window,
    document: Document,
    root: Element, // <html>, carries the theme class
}

impl WasmContext {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(anyhow!("no window"))?;
        let document = window.document().ok_or(anyhow!("window has no document"))?;
        let root = document
            .document_element()
            .ok_or(anyhow!("document has no root element"))?;

        Ok(Self {
            window,
            document,
            root,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn root(&self) -> DomElement {
        DomElement(self.root.clone())
    }

    pub fn element(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement)
    }

    pub fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!("bad selector {}: {:?}", selector, err);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomElement)
            .collect()
    }

    /// Read the inline page config, falling back to defaults.
    pub fn load_config(&self) -> SiteConfig {
        let Some(json) = self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return SiteConfig::default();
        };

        SiteConfig::from_json(&json).unwrap_or_else(|err| {
            warn!("{}, using defaults", err);
            SiteConfig::default()
        })
    }
}

pub fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!("{:?}", err)
}
