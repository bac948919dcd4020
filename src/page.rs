use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use waraq_core::{
    AppState, EscapeAction, NoticeLoad, OpenOutcome, PageController, RenderOutcome, RoleSelection,
    Viewer, ViewerConfig,
};
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::catalog::{DomCatalog, ROLE_ATTR, SOURCE_ATTR, TITLE_ATTR};
use crate::config::{self, PageIds};
use crate::dom;
use crate::guard;
use crate::notice::DomNotice;
use crate::pdfjs::PdfJs;
use crate::storage::BrowserStore;
use crate::viewer::DomViewer;

type Controller = PageController<DomCatalog, DomNotice, DomViewer, Option<PdfJs>>;

thread_local! {
    static PAGE: RefCell<Option<Rc<PageRuntime>>> = RefCell::new(None);
}

struct PageRuntime {
    ids: PageIds,
    document: Document,
    controller: Controller,
    listeners: RefCell<Vec<EventListener>>,
}

pub(crate) fn start() {
    let Some(document) = dom::document() else {
        gloo::console::warn!("page: no document, nothing to start");
        return;
    };
    let ids = PageIds::default();
    set_year(&document, &ids);

    let rasterizer = PdfJs::detect();
    match &rasterizer {
        Some(pdfjs) => {
            if let Err(err) = pdfjs.configure_worker(&config::pdfjs_worker_src()) {
                gloo::console::warn!("pdfjs: worker configuration failed", err);
            }
        }
        None => gloo::console::log!("pdfjs: not loaded, documents open in a frame"),
    }

    let app = AppState::new(Box::new(BrowserStore::local()), Box::new(BrowserStore::session()));
    let viewer = Viewer::new(
        DomViewer::from_document(&document, &ids),
        rasterizer,
        ViewerConfig::default(),
        is_file_origin(),
    );
    let controller = PageController::new(
        app,
        DomCatalog::from_document(&document, &ids),
        DomNotice::from_document(&document, &ids),
        viewer,
    );
    let guard_listeners = guard::install(&document);
    let runtime = Rc::new(PageRuntime {
        ids,
        document,
        controller,
        listeners: RefCell::new(guard_listeners),
    });
    runtime.install_listeners();
    if let Some(selection) = runtime.controller.restore_role() {
        log_selection("restored", &selection);
    }
    runtime.schedule_notice();
    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(runtime);
    });
}

fn set_year(document: &Document, ids: &PageIds) {
    if let Some(element) = dom::element_by_id(document, ids.year) {
        let year = js_sys::Date::new_0().get_full_year();
        element.set_text_content(Some(&year.to_string()));
    }
}

fn is_file_origin() -> bool {
    web_sys::window()
        .and_then(|window| window.location().protocol().ok())
        .is_some_and(|protocol| protocol == "file:")
}

fn log_selection(label: &str, selection: &RoleSelection) {
    gloo::console::log!(
        "role",
        label,
        selection.role.as_str(),
        format!("{} visible", selection.visible)
    );
    if let Err(err) = &selection.persisted {
        gloo::console::warn!("role: not persisted", err.to_string());
    }
}

impl PageRuntime {
    fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn install_listeners(self: &Rc<Self>) {
        for button in dom::query_all_in_document(&self.document, self.ids.role_button_selector) {
            let page = Rc::clone(self);
            let source = button.clone();
            self.listen(EventListener::new(&button, "click", move |_event| {
                let Some(raw) = dom::attribute(&source, ROLE_ATTR) else {
                    return;
                };
                match page.controller.select_role_named(&raw) {
                    Some(selection) => log_selection("selected", &selection),
                    None => gloo::console::warn!("role: ignoring unknown role", raw),
                }
            }));
        }

        let page = Rc::clone(self);
        self.listen(EventListener::new(&self.document, "click", move |event: &Event| {
            let Some(target) = dom::target_element(event.target()) else {
                return;
            };
            let Some(button) = dom::closest(&target, page.ids.view_button_selector) else {
                return;
            };
            if let Some(card) = dom::closest(&button, page.ids.card_with_source_selector) {
                page.open_card(&card);
            }
        }));

        if let Some(close) = dom::element_by_id(&self.document, self.ids.close_viewer) {
            let page = Rc::clone(self);
            self.listen(EventListener::new(&close, "click", move |_event| {
                page.controller.close_viewer();
            }));
        }

        if let Some(frame) = self.controller.viewer().surface().frame() {
            let page = Rc::clone(self);
            self.listen(EventListener::new(frame, "load", move |_event| {
                page.controller.frame_loaded();
            }));
        }

        for id in [self.ids.notice_ok, self.ids.notice_backdrop] {
            if let Some(element) = dom::element_by_id(&self.document, id) {
                let page = Rc::clone(self);
                self.listen(EventListener::new(&element, "click", move |_event| {
                    page.controller.dismiss_notice();
                }));
            }
        }

        let page = Rc::clone(self);
        self.listen(EventListener::new(&self.document, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() != "Escape" {
                return;
            }
            if page.controller.escape() == EscapeAction::DismissedNotice {
                gloo::console::log!("notice: dismissed with escape");
            }
        }));
    }

    fn open_card(&self, card: &Element) {
        let Some(source) = dom::attribute(card, SOURCE_ATTR) else {
            return;
        };
        let title = dom::attribute(card, TITLE_ATTR);
        match self.controller.open_document(title.as_deref(), &source) {
            OpenOutcome::Ignored => {}
            OpenOutcome::Frame => gloo::console::log!("viewer: frame", source),
            OpenOutcome::FellBack(err) => {
                gloo::console::warn!("viewer: canvas failed, using frame", err.to_string());
            }
            OpenOutcome::Canvas(render) => spawn_local(async move {
                match render.await {
                    RenderOutcome::Completed { pages } => {
                        gloo::console::log!("viewer: rendered", source, format!("{pages} pages"));
                    }
                    RenderOutcome::Superseded => gloo::console::log!("viewer: superseded", source),
                    RenderOutcome::FellBack(err) => {
                        gloo::console::warn!("viewer: canvas failed, using frame", err.to_string());
                    }
                }
            }),
        }
    }

    fn show_notice(&self) {
        match self.controller.show_notice() {
            NoticeLoad::Shown { flag_saved: Err(err) } => {
                gloo::console::warn!("notice: session flag not saved", err.to_string());
            }
            NoticeLoad::Missing => gloo::console::log!("notice: element missing"),
            NoticeLoad::Shown { .. } | NoticeLoad::AlreadyShown => {}
        }
    }

    fn schedule_notice(self: &Rc<Self>) {
        if self.document.ready_state() == "complete" {
            self.show_notice();
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let page = Rc::clone(self);
        self.listen(EventListener::once(&window, "load", move |_event| {
            page.show_notice();
        }));
    }
}
