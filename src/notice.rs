use wasm_bindgen::JsCast;
use waraq_core::NoticeSurface;
use web_sys::{Document, Element, HtmlElement};

use crate::config::PageIds;
use crate::dom;

pub(crate) struct DomNotice {
    modal: Option<Element>,
    ok_button: Option<HtmlElement>,
    root: Option<HtmlElement>,
    body: Option<HtmlElement>,
}

impl DomNotice {
    pub(crate) fn from_document(document: &Document, ids: &PageIds) -> Self {
        Self {
            modal: dom::element_by_id(document, ids.notice_modal),
            ok_button: dom::html_by_id(document, ids.notice_ok),
            root: document
                .document_element()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok()),
            body: document.body(),
        }
    }
}

impl NoticeSurface for DomNotice {
    fn is_present(&self) -> bool {
        self.modal.is_some()
    }

    fn set_visible(&self, visible: bool) {
        dom::set_hidden_opt(self.modal.as_ref(), !visible);
    }

    fn set_scroll_locked(&self, locked: bool) {
        for element in [self.root.as_ref(), self.body.as_ref()].into_iter().flatten() {
            let style = element.style();
            let _ = if locked {
                style.set_property("overflow", "hidden")
            } else {
                style.remove_property("overflow").map(|_| ())
            };
        }
    }

    fn focus_acknowledge(&self) {
        if let Some(button) = &self.ok_button {
            let _ = button.focus();
        }
    }
}
