pub(crate) const DEFAULT_PDFJS_WORKER_SRC: &str =
    "https://cdn.jsdelivr.net/npm/pdfjs-dist@3.11.174/build/pdf.worker.min.js";

pub(crate) const HIDDEN_CLASS: &str = "hidden";
pub(crate) const ACTIVE_ROLE_CLASSES: &[&str] = &["bg-brand-500", "text-white", "hover:bg-brand-600"];
pub(crate) const PAGE_CANVAS_CLASS: &str =
    "mx-auto block rounded-lg bg-slate-900 shadow border border-slate-800";

pub(crate) fn pdfjs_worker_src() -> String {
    if let Some(raw) = option_env!("WARAQ_PDFJS_WORKER_SRC")
        .or(option_env!("TRUNK_PUBLIC_WARAQ_PDFJS_WORKER_SRC"))
    {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    DEFAULT_PDFJS_WORKER_SRC.to_string()
}

#[derive(Clone, Debug)]
pub(crate) struct PageIds {
    pub(crate) viewer_section: &'static str,
    pub(crate) frame: &'static str,
    pub(crate) canvas_container: &'static str,
    pub(crate) viewer_title: &'static str,
    pub(crate) close_viewer: &'static str,
    pub(crate) year: &'static str,
    pub(crate) cards_grid: &'static str,
    pub(crate) role_prompt: &'static str,
    pub(crate) viewer_loader: &'static str,
    pub(crate) cards_count: &'static str,
    pub(crate) site_header: &'static str,
    pub(crate) role_section: &'static str,
    pub(crate) site_footer: &'static str,
    pub(crate) notice_modal: &'static str,
    pub(crate) notice_ok: &'static str,
    pub(crate) notice_backdrop: &'static str,
    pub(crate) role_button_selector: &'static str,
    pub(crate) card_selector: &'static str,
    pub(crate) view_button_selector: &'static str,
    pub(crate) card_with_source_selector: &'static str,
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            viewer_section: "viewerSection",
            frame: "pdfFrame",
            canvas_container: "pdfCanvasContainer",
            viewer_title: "viewerTitle",
            close_viewer: "closeViewer",
            year: "year",
            cards_grid: "cardsGrid",
            role_prompt: "rolePrompt",
            viewer_loader: "viewerLoader",
            cards_count: "cardsCount",
            site_header: "siteHeader",
            role_section: "roleSection",
            site_footer: "siteFooter",
            notice_modal: "noticeModal",
            notice_ok: "noticeOk",
            notice_backdrop: "noticeBackdrop",
            role_button_selector: ".role-btn",
            card_selector: "article",
            view_button_selector: ".view-btn",
            card_with_source_selector: "article[data-src]",
        }
    }
}
