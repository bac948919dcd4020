use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, Node, NodeList};

use crate::config::HIDDEN_CLASS;

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn element_by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub(crate) fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    element_by_id(document, id)?.dyn_into::<HtmlElement>().ok()
}

pub(crate) fn set_hidden(element: &Element, hidden: bool) {
    let classes = element.class_list();
    let _ = if hidden {
        classes.add_1(HIDDEN_CLASS)
    } else {
        classes.remove_1(HIDDEN_CLASS)
    };
}

pub(crate) fn set_hidden_opt<E: AsRef<Element>>(element: Option<&E>, hidden: bool) {
    if let Some(element) = element {
        set_hidden(element.as_ref(), hidden);
    }
}

#[cfg(test)]
pub(crate) fn is_hidden(element: &Element) -> bool {
    element.class_list().contains(HIDDEN_CLASS)
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    elements(root.query_selector_all(selector))
}

pub(crate) fn query_all_in_document(document: &Document, selector: &str) -> Vec<Element> {
    elements(document.query_selector_all(selector))
}

/// Element for an event target; text nodes resolve to their parent.
pub(crate) fn target_element(target: Option<EventTarget>) -> Option<Element> {
    let target = target?;
    if let Some(element) = target.dyn_ref::<Element>() {
        return Some(element.clone());
    }
    target.dyn_into::<Node>().ok()?.parent_element()
}

pub(crate) fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

pub(crate) fn attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        if let Some(message) = err.message().as_string() {
            return message;
        }
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
