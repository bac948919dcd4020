use std::cell::RefCell;

use waraq_core::{CardInfo, CatalogSurface, Role};
use web_sys::{Document, Element, HtmlElement};

use crate::config::{PageIds, ACTIVE_ROLE_CLASSES};
use crate::dom;

pub(crate) const ROLE_ATTR: &str = "data-role";
pub(crate) const SOURCE_ATTR: &str = "data-src";
pub(crate) const TITLE_ATTR: &str = "data-title";
const ROLE_TAG_ATTR: &str = "data-gender";

/// Card grid, role buttons and the count badge as found in the page.
pub(crate) struct DomCatalog {
    body: Option<HtmlElement>,
    grid: Option<Element>,
    prompt: Option<Element>,
    count: Option<Element>,
    role_buttons: Vec<Element>,
    card_selector: &'static str,
    // Elements behind the last `cards()` listing; indices refer to this.
    card_elements: RefCell<Vec<Element>>,
}

impl DomCatalog {
    pub(crate) fn from_document(document: &Document, ids: &PageIds) -> Self {
        Self {
            body: document.body(),
            grid: dom::element_by_id(document, ids.cards_grid),
            prompt: dom::element_by_id(document, ids.role_prompt),
            count: dom::element_by_id(document, ids.cards_count),
            role_buttons: dom::query_all_in_document(document, ids.role_button_selector),
            card_selector: ids.card_selector,
            card_elements: RefCell::new(Vec::new()),
        }
    }

    fn query_cards(&self) -> Vec<Element> {
        match &self.grid {
            Some(grid) => dom::query_all(grid, self.card_selector),
            None => Vec::new(),
        }
    }
}

impl CatalogSurface for DomCatalog {
    fn mark_active_role(&self, role: Role) {
        for button in &self.role_buttons {
            let active = dom::attribute(button, ROLE_ATTR).as_deref() == Some(role.as_str());
            let classes = button.class_list();
            for class in ACTIVE_ROLE_CLASSES {
                let _ = classes.toggle_with_force(class, active);
            }
        }
    }

    fn set_grid_visible(&self, visible: bool) {
        dom::set_hidden_opt(self.grid.as_ref(), !visible);
    }

    fn set_prompt_visible(&self, visible: bool) {
        dom::set_hidden_opt(self.prompt.as_ref(), !visible);
    }

    fn set_theme(&self, role: Role) {
        let Some(body) = &self.body else {
            return;
        };
        let classes = body.class_list();
        for class in Role::all_theme_classes() {
            let _ = classes.remove_1(class);
        }
        let _ = classes.add_1(role.theme_class());
    }

    fn cards(&self) -> Vec<CardInfo> {
        let elements = self.query_cards();
        let cards = elements
            .iter()
            .map(|card| {
                let src = dom::attribute(card, SOURCE_ATTR).unwrap_or_default();
                let title = dom::attribute(card, TITLE_ATTR);
                let tag = dom::attribute(card, ROLE_TAG_ATTR);
                CardInfo::new(&src, title.as_deref(), tag.as_deref())
            })
            .collect();
        *self.card_elements.borrow_mut() = elements;
        cards
    }

    fn set_card_visible(&self, index: usize, visible: bool) {
        if let Some(card) = self.card_elements.borrow().get(index) {
            dom::set_hidden(card, !visible);
        }
    }

    fn show_count(&self, label: &str) {
        if let Some(count) = &self.count {
            dom::set_hidden(count, false);
            count.set_text_content(Some(label));
        }
    }
}
