//! DOM seams.
//!
//! The controllers only touch the page through these traits. The wasm
//! workload implements them over `web-sys`; tests use the in-memory DOM
//! in `testing`.

use turbo_data::FormFields;

use crate::InteractionError;

/// A handle to an element in the page.
///
/// Handles are cheap clones referring to the same node.
pub trait Element: Clone + 'static {
    /// Descendants matching a class selector such as `.carousel-item`.
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;

    fn next_element_sibling(&self) -> Option<Self>;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_text_content(&self, text: &str);

    fn set_class_name(&self, class: &str);

    /// Set one inline style property.
    fn set_style(&self, property: &str, value: &str) -> Result<(), InteractionError>;

    fn append_child(&self, child: &Self) -> Result<(), InteractionError>;

    /// Detach the element from its parent. No-op when already detached.
    fn remove(&self);

    /// Run `handler` on every click for the lifetime of the page.
    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), InteractionError>;

    /// Run `handler` on every submit of this form.
    ///
    /// The browser's own submission is always suppressed before the
    /// handler runs; the handler receives every form entry, file inputs included.
    fn on_submit(&self, handler: Box<dyn FnMut(FormFields)>) -> Result<(), InteractionError>;
}

/// The parsed page.
pub trait Document: Clone + 'static {
    type Element: Element;

    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Element, InteractionError>;
}
