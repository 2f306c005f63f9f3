use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use portfolio_core::effects::Rect;
use portfolio_core::ElementHandle;


#[derive(Debug, Clone)]
pub struct DomElement(pub Element);

impl DomElement {
    pub fn rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }

    pub fn find(&self, selector: &str) -> Option<DomElement> {
        self.0.query_selector(selector).ok().flatten().map(DomElement)
    }
}

fn ignore(op: &str, result: Result<impl Sized, JsValue>) {
    if let Err(err) = result {
        debug!("{} failed: {:?}", op, err);
    }
}

impl ElementHandle for DomElement {
    fn set_class(&self, class: &str, on: bool) {
        ignore("classList.toggle", self.0.class_list().toggle_with_force(class, on));
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            ignore("setAttribute", self.0.set_attribute("disabled", ""));
        } else {
            ignore("removeAttribute", self.0.remove_attribute("disabled"));
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(el) = self.0.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            ignore("style.removeProperty", style.remove_property(property));
        } else {
            ignore("style.setProperty", style.set_property(property, value));
        }
    }
}
