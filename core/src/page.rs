use std::cell::RefCell;
use std::rc::Rc;

use crate::filter::{CatalogSurface, RoleFilter};
use crate::notice::{NoticeLoad, NoticeSurface, SessionNotice};
use crate::role::Role;
use crate::store::{AppState, PersistedRole, StoreError};
use crate::viewer::{OpenOutcome, PageRasterizer, Viewer, ViewerSurface};

#[derive(Debug, PartialEq, Eq)]
pub struct RoleSelection {
    pub role: Role,
    pub visible: usize,
    pub persisted: Result<(), StoreError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeAction {
    DismissedNotice,
    ClosedViewer,
}

pub struct PageController<C, N, V, R>
where
    C: CatalogSurface,
    N: NoticeSurface,
    V: ViewerSurface,
    R: PageRasterizer<Canvas = V::Canvas>,
{
    app: AppState,
    filter: RefCell<RoleFilter<C>>,
    notice: RefCell<SessionNotice<N>>,
    viewer: Rc<Viewer<V, R>>,
}

impl<C, N, V, R> PageController<C, N, V, R>
where
    C: CatalogSurface,
    N: NoticeSurface,
    V: ViewerSurface + 'static,
    R: PageRasterizer<Canvas = V::Canvas> + 'static,
{
    pub fn new(app: AppState, catalog: C, notice: N, viewer: Viewer<V, R>) -> Self {
        Self {
            app,
            filter: RefCell::new(RoleFilter::new(catalog)),
            notice: RefCell::new(SessionNotice::new(notice)),
            viewer: Rc::new(viewer),
        }
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn viewer(&self) -> &Rc<Viewer<V, R>> {
        &self.viewer
    }

    pub fn active_role(&self) -> Option<Role> {
        self.filter.borrow().active()
    }

    pub fn notice_visible(&self) -> bool {
        self.notice.borrow().is_visible()
    }

    /// Re-applies a persisted role so a returning visitor lands on the filtered view.
    pub fn restore_role(&self) -> Option<RoleSelection> {
        let role = self.app.role()?;
        Some(self.select_role(role))
    }

    pub fn select_role(&self, role: Role) -> RoleSelection {
        let visible = self.filter.borrow_mut().apply(role);
        self.close_viewer();
        RoleSelection {
            role,
            visible,
            persisted: self.app.save_role(role),
        }
    }

    pub fn select_role_named(&self, raw: &str) -> Option<RoleSelection> {
        let role = Role::parse(raw).ok()?;
        Some(self.select_role(role))
    }

    pub fn show_notice(&self) -> NoticeLoad {
        self.notice.borrow_mut().on_load(&self.app)
    }

    pub fn dismiss_notice(&self) -> bool {
        self.notice.borrow_mut().dismiss()
    }

    pub fn open_document(&self, title: Option<&str>, source: &str) -> OpenOutcome {
        self.viewer.open(title, source)
    }

    pub fn close_viewer(&self) {
        let show_grid = match self.app.persisted_role() {
            PersistedRole::Set(_) => true,
            PersistedRole::Unset => false,
            PersistedRole::Unreadable => true,
        };
        self.viewer.close(show_grid);
    }

    pub fn frame_loaded(&self) -> bool {
        self.viewer.frame_loaded()
    }

    /// Escape dismisses a visible notice first and only otherwise closes the viewer.
    pub fn escape(&self) -> EscapeAction {
        if self.dismiss_notice() {
            return EscapeAction::DismissedNotice;
        }
        self.close_viewer();
        EscapeAction::ClosedViewer
    }
}
