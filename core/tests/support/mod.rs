#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use waraq_core::{
    CardInfo, CatalogSurface, ChromeSection, NoticeSurface, PageLayout, PageRasterizer, PageSize,
    RenderError, Role, ViewerSurface, CHROME_SECTIONS,
};

#[derive(Default)]
pub struct SurfaceState {
    pub present: bool,
    pub canvas_container: bool,
    pub title: Option<String>,
    pub loading: bool,
    pub chrome: HashMap<ChromeSection, bool>,
    pub viewer_visible: bool,
    pub close_focused: u32,
    pub scrolled: u32,
    pub canvas_visible: bool,
    pub canvases: Vec<u32>,
    pub next_canvas: u32,
    pub container_width: f64,
    pub pixel_ratio: f64,
    pub frame_visible: bool,
    pub frame_src: Option<String>,
}

#[derive(Clone)]
pub struct FakeViewerSurface(pub Rc<RefCell<SurfaceState>>);

impl FakeViewerSurface {
    pub fn new() -> Self {
        let mut state = SurfaceState {
            present: true,
            canvas_container: true,
            loading: true,
            container_width: 824.0,
            pixel_ratio: 1.0,
            ..SurfaceState::default()
        };
        for section in CHROME_SECTIONS {
            state.chrome.insert(section, true);
        }
        state.chrome.insert(ChromeSection::CardGrid, false);
        Self(Rc::new(RefCell::new(state)))
    }

    pub fn without_canvas_container() -> Self {
        let surface = Self::new();
        surface.0.borrow_mut().canvas_container = false;
        surface
    }

    pub fn chrome(&self, section: ChromeSection) -> bool {
        self.0.borrow().chrome.get(&section).copied().unwrap_or(false)
    }

    pub fn chrome_hidden(&self) -> bool {
        CHROME_SECTIONS.iter().all(|section| !self.chrome(*section))
    }
}

impl ViewerSurface for FakeViewerSurface {
    type Canvas = u32;

    fn is_present(&self) -> bool {
        self.0.borrow().present
    }

    fn has_canvas_container(&self) -> bool {
        self.0.borrow().canvas_container
    }

    fn set_title(&self, title: &str) {
        self.0.borrow_mut().title = Some(title.to_string());
    }

    fn set_loading(&self, visible: bool) {
        self.0.borrow_mut().loading = visible;
    }

    fn set_chrome_visible(&self, section: ChromeSection, visible: bool) {
        self.0.borrow_mut().chrome.insert(section, visible);
    }

    fn set_viewer_visible(&self, visible: bool) {
        self.0.borrow_mut().viewer_visible = visible;
    }

    fn focus_close(&self) {
        self.0.borrow_mut().close_focused += 1;
    }

    fn scroll_into_view(&self) {
        self.0.borrow_mut().scrolled += 1;
    }

    fn set_canvas_visible(&self, visible: bool) {
        self.0.borrow_mut().canvas_visible = visible;
    }

    fn clear_canvases(&self) {
        self.0.borrow_mut().canvases.clear();
    }

    fn container_width(&self) -> f64 {
        self.0.borrow().container_width
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.0.borrow().pixel_ratio
    }

    fn append_canvas(&self, _layout: &PageLayout) -> Result<u32, RenderError> {
        let mut state = self.0.borrow_mut();
        state.next_canvas += 1;
        let id = state.next_canvas;
        state.canvases.push(id);
        Ok(id)
    }

    fn set_frame_visible(&self, visible: bool) {
        self.0.borrow_mut().frame_visible = visible;
    }

    fn set_frame_source(&self, source: &str) {
        self.0.borrow_mut().frame_src = Some(source.to_string());
    }
}

#[derive(Clone, Default)]
pub struct FakeDocument {
    pub pages: u32,
    pub fail_load: bool,
    pub fail_render_at: Option<u32>,
}

pub struct FakeTask {
    pub url: String,
    pub destroyed: Cell<bool>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

#[derive(Clone)]
pub struct LoadedDocument {
    url: String,
    fixture: FakeDocument,
}

pub struct FakePage {
    url: String,
    index: u32,
    fail: bool,
}

#[derive(Default)]
pub struct RasterLog {
    pub loads: Vec<String>,
    pub rendered: Vec<(String, u32, u32)>,
    pub destroyed: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeRasterizer {
    documents: Rc<RefCell<HashMap<String, FakeDocument>>>,
    gates: Rc<RefCell<HashMap<String, oneshot::Receiver<()>>>>,
    page_gates: Rc<RefCell<HashMap<(String, u32), oneshot::Receiver<()>>>>,
    render_gates: Rc<RefCell<HashMap<(String, u32), oneshot::Receiver<()>>>>,
    pub log: Rc<RefCell<RasterLog>>,
}

impl FakeRasterizer {
    pub fn with_document(self, url: &str, document: FakeDocument) -> Self {
        self.documents.borrow_mut().insert(url.to_string(), document);
        self
    }

    /// The next load of `url` waits until the returned sender fires.
    pub fn gate(&self, url: &str) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.gates.borrow_mut().insert(url.to_string(), receiver);
        sender
    }

    /// Fetching page `index` of `url` waits until the returned sender fires.
    pub fn gate_page(&self, url: &str, index: u32) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.page_gates
            .borrow_mut()
            .insert((url.to_string(), index), receiver);
        sender
    }

    /// Drawing page `index` of `url` waits until the returned sender fires.
    pub fn gate_render(&self, url: &str, index: u32) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.render_gates
            .borrow_mut()
            .insert((url.to_string(), index), receiver);
        sender
    }

    pub fn rendered_urls(&self) -> Vec<String> {
        self.log
            .borrow()
            .rendered
            .iter()
            .map(|(url, _, _)| url.clone())
            .collect()
    }

    pub fn rendered_pages(&self) -> Vec<u32> {
        self.log
            .borrow()
            .rendered
            .iter()
            .map(|(_, index, _)| *index)
            .collect()
    }
}

impl PageRasterizer for FakeRasterizer {
    type Canvas = u32;
    type Task = Rc<FakeTask>;
    type Document = LoadedDocument;
    type Page = FakePage;

    fn is_available(&self) -> bool {
        true
    }

    fn start_load(&self, url: &str) -> Result<Self::Task, RenderError> {
        self.log.borrow_mut().loads.push(url.to_string());
        Ok(Rc::new(FakeTask {
            url: url.to_string(),
            destroyed: Cell::new(false),
            gate: RefCell::new(self.gates.borrow_mut().remove(url)),
        }))
    }

    async fn document(&self, task: &Self::Task) -> Result<Self::Document, RenderError> {
        let gate = task.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let fixture = self
            .documents
            .borrow()
            .get(&task.url)
            .cloned()
            .ok_or_else(|| RenderError::Load(format!("missing {}", task.url)))?;
        if fixture.fail_load {
            return Err(RenderError::Load("rejected".to_string()));
        }
        Ok(LoadedDocument {
            url: task.url.clone(),
            fixture,
        })
    }

    fn page_count(&self, document: &Self::Document) -> u32 {
        document.fixture.pages
    }

    async fn page(&self, document: &Self::Document, index: u32) -> Result<Self::Page, RenderError> {
        let gate = self
            .page_gates
            .borrow_mut()
            .remove(&(document.url.clone(), index));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(FakePage {
            url: document.url.clone(),
            index,
            fail: document.fixture.fail_render_at == Some(index),
        })
    }

    fn page_size(&self, _page: &Self::Page) -> PageSize {
        PageSize {
            width: 400.0,
            height: 600.0,
        }
    }

    async fn render(
        &self,
        page: &Self::Page,
        canvas: &Self::Canvas,
        _layout: &PageLayout,
    ) -> Result<(), RenderError> {
        let gate = self
            .render_gates
            .borrow_mut()
            .remove(&(page.url.clone(), page.index));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if page.fail {
            return Err(RenderError::Render {
                index: page.index,
                message: "draw failed".to_string(),
            });
        }
        self.log
            .borrow_mut()
            .rendered
            .push((page.url.clone(), page.index, *canvas));
        Ok(())
    }

    fn destroy(&self, task: &Self::Task) {
        task.destroyed.set(true);
        self.log.borrow_mut().destroyed.push(task.url.clone());
    }
}

#[derive(Default)]
pub struct CatalogState {
    pub cards: Vec<CardInfo>,
    pub visible: Vec<bool>,
    pub prompt: bool,
    pub theme: Option<Role>,
    pub active: Option<Role>,
    pub count: Option<String>,
}

/// Catalog surface sharing the grid flag with the viewer surface, as the DOM does.
#[derive(Clone)]
pub struct FakeCatalog {
    pub state: Rc<RefCell<CatalogState>>,
    viewer: FakeViewerSurface,
}

impl FakeCatalog {
    pub fn new(viewer: &FakeViewerSurface, cards: Vec<CardInfo>) -> Self {
        let visible = vec![true; cards.len()];
        Self {
            state: Rc::new(RefCell::new(CatalogState {
                cards,
                visible,
                prompt: true,
                ..CatalogState::default()
            })),
            viewer: viewer.clone(),
        }
    }

    pub fn visible_sources(&self) -> Vec<String> {
        let state = self.state.borrow();
        state
            .cards
            .iter()
            .zip(state.visible.iter())
            .filter(|(_, visible)| **visible)
            .map(|(card, _)| card.src.clone())
            .collect()
    }
}

impl CatalogSurface for FakeCatalog {
    fn mark_active_role(&self, role: Role) {
        self.state.borrow_mut().active = Some(role);
    }

    fn set_grid_visible(&self, visible: bool) {
        self.viewer.set_chrome_visible(ChromeSection::CardGrid, visible);
    }

    fn set_prompt_visible(&self, visible: bool) {
        self.state.borrow_mut().prompt = visible;
    }

    fn set_theme(&self, role: Role) {
        self.state.borrow_mut().theme = Some(role);
    }

    fn cards(&self) -> Vec<CardInfo> {
        self.state.borrow().cards.clone()
    }

    fn set_card_visible(&self, index: usize, visible: bool) {
        if let Some(slot) = self.state.borrow_mut().visible.get_mut(index) {
            *slot = visible;
        }
    }

    fn show_count(&self, label: &str) {
        self.state.borrow_mut().count = Some(label.to_string());
    }
}

#[derive(Default)]
pub struct NoticeLog {
    pub visible: bool,
    pub scroll_locked: bool,
    pub focused: u32,
    pub shown_count: u32,
}

#[derive(Clone, Default)]
pub struct FakeNotice(pub Rc<RefCell<NoticeLog>>);

impl NoticeSurface for FakeNotice {
    fn is_present(&self) -> bool {
        true
    }

    fn set_visible(&self, visible: bool) {
        let mut log = self.0.borrow_mut();
        if visible {
            log.shown_count += 1;
        }
        log.visible = visible;
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.0.borrow_mut().scroll_locked = locked;
    }

    fn focus_acknowledge(&self) {
        self.0.borrow_mut().focused += 1;
    }
}

pub fn sample_cards() -> Vec<CardInfo> {
    vec![
        CardInfo::new("m1.pdf", Some("M1"), Some("male")),
        CardInfo::new("f1.pdf", Some("F1"), Some("female")),
        CardInfo::new("m2.pdf", None, Some("male")),
        CardInfo::new("m3.pdf", Some("M3"), Some("male")),
        CardInfo::new("f2.pdf", Some("F2"), Some("female")),
    ]
}
