//! `web-sys` implementation of the DOM seams.

use turbo_data::{FileEntry, FormFields};
use turbo_interactions::{Document, Element, InteractionError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

fn dom_error(value: JsValue) -> InteractionError {
    InteractionError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn elements(list: Result<web_sys::NodeList, JsValue>) -> Vec<BrowserElement> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(BrowserElement)
        .collect()
}

/// Entries of a form in document order, file inputs included.
fn read_fields(form: &web_sys::HtmlFormElement) -> FormFields {
    let mut fields = FormFields::new();
    let Ok(data) = web_sys::FormData::new_with_form(form) else {
        return fields;
    };
    let data: JsValue = data.into();
    if let Ok(Some(entries)) = js_sys::try_iter(&data) {
        for entry in entries.flatten() {
            let pair = js_sys::Array::from(&entry);
            let Some(name) = pair.get(0).as_string() else {
                continue;
            };
            let value = pair.get(1);
            if let Some(text) = value.as_string() {
                fields.append(name, text);
            } else if let Ok(file) = value.dyn_into::<web_sys::File>() {
                fields.append_file(name, FileEntry::from_file(file));
            }
        }
    }
    fields
}

#[derive(Clone)]
pub struct BrowserDocument(web_sys::Document);

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }
}

impl Document for BrowserDocument {
    type Element = BrowserElement;

    fn query_selector_all(&self, selector: &str) -> Vec<BrowserElement> {
        elements(self.0.query_selector_all(selector))
    }

    fn get_element_by_id(&self, id: &str) -> Option<BrowserElement> {
        self.0.get_element_by_id(id).map(BrowserElement)
    }

    fn create_element(&self, tag: &str) -> Result<BrowserElement, InteractionError> {
        self.0
            .create_element(tag)
            .map(BrowserElement)
            .map_err(dom_error)
    }
}

#[derive(Clone)]
pub struct BrowserElement(web_sys::Element);

impl Element for BrowserElement {
    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        elements(self.0.query_selector_all(selector))
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.0.next_element_sibling().map(BrowserElement)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_class_name(&self, class: &str) {
        self.0.set_class_name(class);
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), InteractionError> {
        let element = self
            .0
            .dyn_ref::<web_sys::HtmlElement>()
            .ok_or_else(|| InteractionError::Dom(format!("<{}> has no inline style", self.0.tag_name())))?;
        element
            .style()
            .set_property(property, value)
            .map_err(dom_error)
    }

    fn append_child(&self, child: &Self) -> Result<(), InteractionError> {
        self.0.append_child(&child.0).map(|_| ()).map_err(dom_error)
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), InteractionError> {
        let closure = Closure::<dyn FnMut()>::wrap(handler);
        self.0
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        // listeners live as long as the page
        closure.forget();
        Ok(())
    }

    fn on_submit(&self, mut handler: Box<dyn FnMut(FormFields)>) -> Result<(), InteractionError> {
        let form: web_sys::HtmlFormElement = self
            .0
            .clone()
            .dyn_into()
            .map_err(|_| InteractionError::Dom(format!("<{}> is not a form", self.0.tag_name())))?;

        let target = form.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            handler(read_fields(&target));
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        closure.forget();
        Ok(())
    }
}
