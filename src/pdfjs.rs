use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use waraq_core::{PageLayout, PageRasterizer, PageSize, RenderError};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::dom::js_err;

const PDFJS_GLOBAL: &str = "pdfjsLib";

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let func = get(target, method)?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("{method} is not a function")))?;
    let array = Array::new();
    for arg in args {
        array.push(arg);
    }
    func.apply(target, &array)
}

async fn await_promise(value: JsValue) -> Result<JsValue, JsValue> {
    let promise = value
        .dyn_into::<Promise>()
        .map_err(|_| JsValue::from_str("expected a promise"))?;
    JsFuture::from(promise).await
}

fn options(entries: &[(&str, &JsValue)]) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object)
}

fn viewport(page: &JsValue, scale: f64) -> Result<JsValue, JsValue> {
    let opts = options(&[("scale", &JsValue::from_f64(scale))])?;
    call(page, "getViewport", &[opts.into()])
}

/// Handle to `window.pdfjsLib`, present only when the page loaded PDF.js.
pub(crate) struct PdfJs {
    lib: Object,
}

#[derive(Clone)]
pub(crate) struct PdfTask(JsValue);

pub(crate) struct PdfDocument(JsValue);

pub(crate) struct PdfPage {
    index: u32,
    page: JsValue,
}

impl PdfJs {
    pub(crate) fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let value = get(&window, PDFJS_GLOBAL).ok()?;
        if value.is_null() || value.is_undefined() {
            return None;
        }
        let lib = value.dyn_into::<Object>().ok()?;
        Some(Self { lib })
    }

    pub(crate) fn configure_worker(&self, worker_src: &str) -> Result<(), String> {
        let options = get(&self.lib, "GlobalWorkerOptions").map_err(js_err)?;
        if options.is_null() || options.is_undefined() {
            return Err("GlobalWorkerOptions missing".to_string());
        }
        Reflect::set(&options, &JsValue::from_str("workerSrc"), &JsValue::from_str(worker_src))
            .map_err(js_err)?;
        Ok(())
    }
}

impl PageRasterizer for PdfJs {
    type Canvas = HtmlCanvasElement;
    type Task = PdfTask;
    type Document = PdfDocument;
    type Page = PdfPage;

    fn is_available(&self) -> bool {
        true
    }

    fn start_load(&self, url: &str) -> Result<Self::Task, RenderError> {
        let params = options(&[("url", &JsValue::from_str(url))])
            .map_err(|err| RenderError::Load(js_err(err)))?;
        let task = call(&self.lib, "getDocument", &[params.into()])
            .map_err(|err| RenderError::Load(js_err(err)))?;
        Ok(PdfTask(task))
    }

    async fn document(&self, task: &Self::Task) -> Result<Self::Document, RenderError> {
        let promise = get(&task.0, "promise").map_err(|err| RenderError::Load(js_err(err)))?;
        let document = await_promise(promise)
            .await
            .map_err(|err| RenderError::Load(js_err(err)))?;
        Ok(PdfDocument(document))
    }

    fn page_count(&self, document: &Self::Document) -> u32 {
        get(&document.0, "numPages")
            .ok()
            .and_then(|value| value.as_f64())
            .map(|count| count.max(0.0) as u32)
            .unwrap_or(0)
    }

    async fn page(&self, document: &Self::Document, index: u32) -> Result<Self::Page, RenderError> {
        let page_err = |err: JsValue| RenderError::Page {
            index,
            message: js_err(err),
        };
        let promise = call(&document.0, "getPage", &[JsValue::from_f64(index as f64)]).map_err(page_err)?;
        let page = await_promise(promise).await.map_err(page_err)?;
        Ok(PdfPage { index, page })
    }

    fn page_size(&self, page: &Self::Page) -> PageSize {
        let Ok(base) = viewport(&page.page, 1.0) else {
            return PageSize {
                width: 0.0,
                height: 0.0,
            };
        };
        let dimension = |key: &str| get(&base, key).ok().and_then(|value| value.as_f64()).unwrap_or(0.0);
        PageSize {
            width: dimension("width"),
            height: dimension("height"),
        }
    }

    async fn render(
        &self,
        page: &Self::Page,
        canvas: &Self::Canvas,
        layout: &PageLayout,
    ) -> Result<(), RenderError> {
        let render_err = |err: JsValue| RenderError::Render {
            index: page.index,
            message: js_err(err),
        };
        let context = canvas
            .get_context("2d")
            .map_err(render_err)?
            .ok_or_else(|| render_err(JsValue::from_str("2d context unavailable")))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| render_err(JsValue::from_str("unexpected context type")))?;
        let scaled = viewport(&page.page, layout.scale).map_err(render_err)?;
        let params = options(&[("canvasContext", &context.into()), ("viewport", &scaled)])
            .map_err(render_err)?;
        let task = call(&page.page, "render", &[params.into()]).map_err(render_err)?;
        let promise = get(&task, "promise").map_err(render_err)?;
        await_promise(promise).await.map_err(render_err)?;
        Ok(())
    }

    fn destroy(&self, task: &Self::Task) {
        if let Err(err) = call(&task.0, "destroy", &[]) {
            gloo::console::warn!("pdfjs: destroy failed", js_err(err));
        }
    }
}
