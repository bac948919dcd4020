use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::catalog::display_title;

pub const BLANK_SOURCE: &str = "about:blank";

// encodeURI keeps unreserved marks and reserved delimiters.
const URI_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

pub fn encode_uri(raw: &str) -> String {
    utf8_percent_encode(raw, URI_ESCAPE_SET).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("page rasterizer unavailable")]
    Unavailable,
    #[error("document load failed: {0}")]
    Load(String),
    #[error("page {index} fetch failed: {message}")]
    Page { index: u32, message: String },
    #[error("page {index} render failed: {message}")]
    Render { index: u32, message: String },
    #[error("canvas setup failed: {0}")]
    Surface(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub min_container_width: f64,
    pub fallback_container_width: f64,
    pub horizontal_padding: f64,
    pub min_scale: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_container_width: 320.0,
            fallback_container_width: 800.0,
            horizontal_padding: 24.0,
            min_scale: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageLayout {
    pub scale: f64,
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_ratio: f64,
}

pub fn fit_scale(config: &ViewerConfig, container_width: f64, page_width: f64) -> f64 {
    let container = if container_width > 0.0 {
        container_width
    } else {
        config.fallback_container_width
    };
    let container = container.max(config.min_container_width);
    if page_width.is_nan() || page_width <= 0.0 {
        return config.min_scale;
    }
    ((container - config.horizontal_padding) / page_width).max(config.min_scale)
}

pub fn page_layout(
    config: &ViewerConfig,
    container_width: f64,
    pixel_ratio: f64,
    page: PageSize,
) -> PageLayout {
    let scale = fit_scale(config, container_width, page.width);
    let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    let css_width = page.width * scale;
    let css_height = page.height * scale;
    PageLayout {
        scale,
        css_width,
        css_height,
        pixel_width: (css_width * pixel_ratio).floor() as u32,
        pixel_height: (css_height * pixel_ratio).floor() as u32,
        pixel_ratio,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderToken(u64);

/// Monotonic marker for the render sequence allowed to touch the canvas container.
#[derive(Debug, Default)]
pub struct RenderGeneration {
    current: Cell<u64>,
}

impl RenderGeneration {
    pub fn advance(&self) -> RenderToken {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        RenderToken(next)
    }

    pub fn is_current(&self, token: RenderToken) -> bool {
        self.current.get() == token.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChromeSection {
    Header,
    RoleSection,
    CardGrid,
    Footer,
}

pub const CHROME_SECTIONS: [ChromeSection; 4] = [
    ChromeSection::Header,
    ChromeSection::RoleSection,
    ChromeSection::CardGrid,
    ChromeSection::Footer,
];

pub trait ViewerSurface {
    type Canvas;

    /// Viewer section and frame both exist.
    fn is_present(&self) -> bool;
    fn has_canvas_container(&self) -> bool;
    fn set_title(&self, title: &str);
    fn set_loading(&self, visible: bool);
    fn set_chrome_visible(&self, section: ChromeSection, visible: bool);
    fn set_viewer_visible(&self, visible: bool);
    fn focus_close(&self);
    fn scroll_into_view(&self);
    fn set_canvas_visible(&self, visible: bool);
    fn clear_canvases(&self);
    fn container_width(&self) -> f64;
    fn device_pixel_ratio(&self) -> f64;
    fn append_canvas(&self, layout: &PageLayout) -> Result<Self::Canvas, RenderError>;
    fn set_frame_visible(&self, visible: bool);
    fn set_frame_source(&self, source: &str);
}

/// Optional page-rasterizing capability. `Option<R>` is the absent variant.
#[allow(async_fn_in_trait)]
pub trait PageRasterizer {
    type Canvas;
    type Task: Clone;
    type Document;
    type Page;

    fn is_available(&self) -> bool;
    fn start_load(&self, url: &str) -> Result<Self::Task, RenderError>;
    async fn document(&self, task: &Self::Task) -> Result<Self::Document, RenderError>;
    fn page_count(&self, document: &Self::Document) -> u32;
    async fn page(&self, document: &Self::Document, index: u32) -> Result<Self::Page, RenderError>;
    fn page_size(&self, page: &Self::Page) -> PageSize;
    async fn render(
        &self,
        page: &Self::Page,
        canvas: &Self::Canvas,
        layout: &PageLayout,
    ) -> Result<(), RenderError>;
    fn destroy(&self, task: &Self::Task);
}

impl<R: PageRasterizer> PageRasterizer for Option<R> {
    type Canvas = R::Canvas;
    type Task = R::Task;
    type Document = R::Document;
    type Page = R::Page;

    fn is_available(&self) -> bool {
        self.as_ref().map(|inner| inner.is_available()).unwrap_or(false)
    }

    fn start_load(&self, url: &str) -> Result<Self::Task, RenderError> {
        match self {
            Some(inner) => inner.start_load(url),
            None => Err(RenderError::Unavailable),
        }
    }

    async fn document(&self, task: &Self::Task) -> Result<Self::Document, RenderError> {
        match self {
            Some(inner) => inner.document(task).await,
            None => Err(RenderError::Unavailable),
        }
    }

    fn page_count(&self, document: &Self::Document) -> u32 {
        self.as_ref()
            .map(|inner| inner.page_count(document))
            .unwrap_or(0)
    }

    async fn page(&self, document: &Self::Document, index: u32) -> Result<Self::Page, RenderError> {
        match self {
            Some(inner) => inner.page(document, index).await,
            None => Err(RenderError::Unavailable),
        }
    }

    fn page_size(&self, page: &Self::Page) -> PageSize {
        match self {
            Some(inner) => inner.page_size(page),
            None => PageSize {
                width: 0.0,
                height: 0.0,
            },
        }
    }

    async fn render(
        &self,
        page: &Self::Page,
        canvas: &Self::Canvas,
        layout: &PageLayout,
    ) -> Result<(), RenderError> {
        match self {
            Some(inner) => inner.render(page, canvas, layout).await,
            None => Err(RenderError::Unavailable),
        }
    }

    fn destroy(&self, task: &Self::Task) {
        if let Some(inner) = self {
            inner.destroy(task);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerPhase {
    Closed,
    Opening,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPath {
    Canvas,
    Frame,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed { pages: u32 },
    Superseded,
    FellBack(RenderError),
}

pub type PendingRender = Pin<Box<dyn Future<Output = RenderOutcome>>>;

pub enum OpenOutcome {
    Ignored,
    Frame,
    /// Canvas rendering started; the caller drives the future on its executor.
    Canvas(PendingRender),
    FellBack(RenderError),
}

struct ViewerState<T> {
    phase: ViewerPhase,
    path: Option<RenderPath>,
    title: Option<String>,
    source: Option<String>,
    task: Option<T>,
}

impl<T> Default for ViewerState<T> {
    fn default() -> Self {
        Self {
            phase: ViewerPhase::Closed,
            path: None,
            title: None,
            source: None,
            task: None,
        }
    }
}

pub struct Viewer<V, R>
where
    V: ViewerSurface,
    R: PageRasterizer<Canvas = V::Canvas>,
{
    surface: V,
    rasterizer: R,
    config: ViewerConfig,
    file_origin: bool,
    generation: RenderGeneration,
    state: RefCell<ViewerState<R::Task>>,
}

impl<V, R> Viewer<V, R>
where
    V: ViewerSurface + 'static,
    R: PageRasterizer<Canvas = V::Canvas> + 'static,
{
    pub fn new(surface: V, rasterizer: R, config: ViewerConfig, file_origin: bool) -> Self {
        Self {
            surface,
            rasterizer,
            config,
            file_origin,
            generation: RenderGeneration::default(),
            state: RefCell::new(ViewerState::default()),
        }
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn phase(&self) -> ViewerPhase {
        self.state.borrow().phase
    }

    pub fn is_open(&self) -> bool {
        self.phase() != ViewerPhase::Closed
    }

    pub fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }

    pub fn has_task(&self) -> bool {
        self.state.borrow().task.is_some()
    }

    pub fn render_path(&self) -> RenderPath {
        if !self.file_origin && self.rasterizer.is_available() && self.surface.has_canvas_container() {
            RenderPath::Canvas
        } else {
            RenderPath::Frame
        }
    }

    pub fn open(self: &Rc<Self>, title: Option<&str>, source: &str) -> OpenOutcome {
        if source.trim().is_empty() || !self.surface.is_present() {
            return OpenOutcome::Ignored;
        }
        let title = display_title(title);
        self.surface.set_title(title);
        self.surface.set_loading(true);

        let token = self.generation.advance();
        let path = self.render_path();
        let stale = {
            let mut state = self.state.borrow_mut();
            state.phase = ViewerPhase::Opening;
            state.path = Some(path);
            state.title = Some(title.to_string());
            state.source = Some(source.to_string());
            state.task.take()
        };
        if let Some(task) = stale {
            self.rasterizer.destroy(&task);
        }

        let encoded = encode_uri(source);
        self.present();

        if path == RenderPath::Frame {
            if self.surface.has_canvas_container() {
                self.surface.set_canvas_visible(false);
            }
            self.surface.set_frame_visible(true);
            self.surface.set_frame_source(&encoded);
            return OpenOutcome::Frame;
        }

        self.surface.clear_canvases();
        self.surface.set_canvas_visible(true);
        self.surface.set_frame_visible(false);
        let task = match self.rasterizer.start_load(&encoded) {
            Ok(task) => task,
            Err(err) => {
                self.fall_back(&encoded);
                return OpenOutcome::FellBack(err);
            }
        };
        self.state.borrow_mut().task = Some(task.clone());

        let viewer = Rc::clone(self);
        OpenOutcome::Canvas(Box::pin(async move {
            viewer.finish_canvas(token, task, encoded).await
        }))
    }

    pub fn close(&self, show_grid: bool) {
        if !self.surface.is_present() {
            return;
        }
        self.surface.set_viewer_visible(false);
        self.surface.set_frame_source(BLANK_SOURCE);
        self.surface.set_frame_visible(false);

        self.generation.advance();
        let task = {
            let mut state = self.state.borrow_mut();
            let task = state.task.take();
            *state = ViewerState::default();
            task
        };
        if let Some(task) = task {
            self.rasterizer.destroy(&task);
        }
        if self.surface.has_canvas_container() {
            self.surface.clear_canvases();
            self.surface.set_canvas_visible(false);
        }
        self.surface.set_loading(true);

        self.surface.set_chrome_visible(ChromeSection::Header, true);
        self.surface.set_chrome_visible(ChromeSection::RoleSection, true);
        if show_grid {
            self.surface.set_chrome_visible(ChromeSection::CardGrid, true);
        }
        self.surface.set_chrome_visible(ChromeSection::Footer, true);
    }

    /// Frame `load` notification. Ignored while closed or while pages render onto canvases.
    pub fn frame_loaded(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.phase == ViewerPhase::Closed || state.path != Some(RenderPath::Frame) {
            return false;
        }
        state.phase = ViewerPhase::Open;
        drop(state);
        self.surface.set_loading(false);
        true
    }

    fn present(&self) {
        for section in CHROME_SECTIONS {
            self.surface.set_chrome_visible(section, false);
        }
        self.surface.set_viewer_visible(true);
        self.surface.focus_close();
        self.surface.scroll_into_view();
    }

    fn fall_back(&self, encoded: &str) {
        if self.surface.has_canvas_container() {
            self.surface.set_canvas_visible(false);
        }
        self.surface.set_frame_visible(true);
        self.surface.set_frame_source(encoded);
        self.surface.set_loading(false);
        let mut state = self.state.borrow_mut();
        state.phase = ViewerPhase::Open;
        state.path = Some(RenderPath::Frame);
    }

    async fn finish_canvas(&self, token: RenderToken, task: R::Task, encoded: String) -> RenderOutcome {
        match self.render_pages(token, &task).await {
            Ok(RenderOutcome::Completed { pages }) => {
                self.surface.set_loading(false);
                self.state.borrow_mut().phase = ViewerPhase::Open;
                RenderOutcome::Completed { pages }
            }
            Ok(other) => other,
            Err(_) if !self.generation.is_current(token) => RenderOutcome::Superseded,
            Err(err) => {
                self.fall_back(&encoded);
                RenderOutcome::FellBack(err)
            }
        }
    }

    async fn render_pages(&self, token: RenderToken, task: &R::Task) -> Result<RenderOutcome, RenderError> {
        let document = self.rasterizer.document(task).await?;
        let count = self.rasterizer.page_count(&document);
        for index in 1..=count {
            if !self.generation.is_current(token) {
                return Ok(RenderOutcome::Superseded);
            }
            let page = self.rasterizer.page(&document, index).await?;
            if !self.generation.is_current(token) {
                return Ok(RenderOutcome::Superseded);
            }
            let layout = page_layout(
                &self.config,
                self.surface.container_width(),
                self.surface.device_pixel_ratio(),
                self.rasterizer.page_size(&page),
            );
            let canvas = self.surface.append_canvas(&layout)?;
            self.rasterizer.render(&page, &canvas, &layout).await?;
        }
        if !self.generation.is_current(token) {
            return Ok(RenderOutcome::Superseded);
        }
        Ok(RenderOutcome::Completed { pages: count })
    }
}
