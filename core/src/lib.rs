pub mod catalog;
pub mod filter;
pub mod guard;
pub mod notice;
pub mod page;
pub mod role;
pub mod store;
pub mod viewer;

pub use catalog::{count_label, display_title, filter_cards, CardInfo, FilterOutcome, DEFAULT_TITLE};
pub use filter::{CatalogSurface, RoleFilter};
pub use guard::{
    classify_event, classify_key, KeyModifiers, Suppression, GUARDED_EVENTS, INTERACTIVE_SELECTOR,
};
pub use notice::{NoticeLoad, NoticeState, NoticeSurface, SessionNotice};
pub use page::{EscapeAction, PageController, RoleSelection};
pub use role::{is_valid_role, Role, RoleError, ALL_ROLES, ROLE_KEY};
pub use store::{
    AppState, KeyValueStore, MemoryStore, PersistedRole, StoreError, UnavailableStore,
    NOTICE_SHOWN_KEY,
};
pub use viewer::{
    encode_uri, page_layout, ChromeSection, OpenOutcome, PageLayout, PageRasterizer, PageSize,
    PendingRender, RenderError, RenderGeneration, RenderOutcome, RenderPath, RenderToken, Viewer,
    ViewerConfig, ViewerPhase, ViewerSurface, BLANK_SOURCE, CHROME_SECTIONS,
};
