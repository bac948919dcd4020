use wasm_bindgen::JsCast;
use waraq_core::{ChromeSection, PageLayout, RenderError, ViewerSurface};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, HtmlIFrameElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::{PageIds, PAGE_CANVAS_CLASS};
use crate::dom::{self, js_err};

pub(crate) struct DomViewer {
    document: Document,
    section: Option<HtmlElement>,
    frame: Option<HtmlIFrameElement>,
    canvas_container: Option<HtmlElement>,
    title: Option<Element>,
    close_button: Option<HtmlElement>,
    loader: Option<Element>,
    header: Option<Element>,
    role_section: Option<Element>,
    grid: Option<Element>,
    footer: Option<Element>,
}

impl DomViewer {
    pub(crate) fn from_document(document: &Document, ids: &PageIds) -> Self {
        Self {
            document: document.clone(),
            section: dom::html_by_id(document, ids.viewer_section),
            frame: dom::element_by_id(document, ids.frame)
                .and_then(|element| element.dyn_into::<HtmlIFrameElement>().ok()),
            canvas_container: dom::html_by_id(document, ids.canvas_container),
            title: dom::element_by_id(document, ids.viewer_title),
            close_button: dom::html_by_id(document, ids.close_viewer),
            loader: dom::element_by_id(document, ids.viewer_loader),
            header: dom::element_by_id(document, ids.site_header),
            role_section: dom::element_by_id(document, ids.role_section),
            grid: dom::element_by_id(document, ids.cards_grid),
            footer: dom::element_by_id(document, ids.site_footer),
        }
    }

    pub(crate) fn frame(&self) -> Option<&HtmlIFrameElement> {
        self.frame.as_ref()
    }

    fn chrome(&self, section: ChromeSection) -> Option<&Element> {
        match section {
            ChromeSection::Header => self.header.as_ref(),
            ChromeSection::RoleSection => self.role_section.as_ref(),
            ChromeSection::CardGrid => self.grid.as_ref(),
            ChromeSection::Footer => self.footer.as_ref(),
        }
    }
}

impl ViewerSurface for DomViewer {
    type Canvas = HtmlCanvasElement;

    fn is_present(&self) -> bool {
        self.section.is_some() && self.frame.is_some()
    }

    fn has_canvas_container(&self) -> bool {
        self.canvas_container.is_some()
    }

    fn set_title(&self, title: &str) {
        if let Some(element) = &self.title {
            element.set_text_content(Some(title));
        }
    }

    fn set_loading(&self, visible: bool) {
        dom::set_hidden_opt(self.loader.as_ref(), !visible);
    }

    fn set_chrome_visible(&self, section: ChromeSection, visible: bool) {
        dom::set_hidden_opt(self.chrome(section), !visible);
    }

    fn set_viewer_visible(&self, visible: bool) {
        dom::set_hidden_opt(self.section.as_ref(), !visible);
    }

    fn focus_close(&self) {
        if let Some(button) = &self.close_button {
            let _ = button.focus();
        }
    }

    fn scroll_into_view(&self) {
        let Some(section) = &self.section else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn set_canvas_visible(&self, visible: bool) {
        dom::set_hidden_opt(self.canvas_container.as_ref(), !visible);
    }

    fn clear_canvases(&self) {
        if let Some(container) = &self.canvas_container {
            container.set_inner_html("");
        }
    }

    fn container_width(&self) -> f64 {
        self.canvas_container
            .as_ref()
            .map(|container| container.client_width() as f64)
            .unwrap_or(0.0)
    }

    fn device_pixel_ratio(&self) -> f64 {
        web_sys::window()
            .map(|window| window.device_pixel_ratio())
            .unwrap_or(1.0)
    }

    fn append_canvas(&self, layout: &PageLayout) -> Result<HtmlCanvasElement, RenderError> {
        let container = self
            .canvas_container
            .as_ref()
            .ok_or_else(|| RenderError::Surface("canvas container missing".to_string()))?;
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|err| RenderError::Surface(js_err(err)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::Surface("created element is not a canvas".to_string()))?;
        canvas.set_dir("rtl");
        canvas.set_class_name(PAGE_CANVAS_CLASS);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", layout.css_width));
        let _ = style.set_property("height", &format!("{}px", layout.css_height));
        canvas.set_width(layout.pixel_width);
        canvas.set_height(layout.pixel_height);

        let context = canvas
            .get_context("2d")
            .map_err(|err| RenderError::Surface(js_err(err)))?
            .ok_or_else(|| RenderError::Surface("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Surface("unexpected context type".to_string()))?;
        context
            .set_transform(layout.pixel_ratio, 0.0, 0.0, layout.pixel_ratio, 0.0, 0.0)
            .map_err(|err| RenderError::Surface(js_err(err)))?;

        container
            .append_child(&canvas)
            .map_err(|err| RenderError::Surface(js_err(err)))?;
        Ok(canvas)
    }

    fn set_frame_visible(&self, visible: bool) {
        dom::set_hidden_opt(self.frame.as_ref(), !visible);
    }

    fn set_frame_source(&self, source: &str) {
        if let Some(frame) = &self.frame {
            frame.set_src(source);
        }
    }
}
