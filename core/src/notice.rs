use crate::store::{AppState, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeState {
    Unshown,
    Shown,
    Dismissed,
}

pub trait NoticeSurface {
    fn is_present(&self) -> bool;
    fn set_visible(&self, visible: bool);
    fn set_scroll_locked(&self, locked: bool);
    fn focus_acknowledge(&self);
}

#[derive(Debug, PartialEq, Eq)]
pub enum NoticeLoad {
    AlreadyShown,
    Missing,
    Shown { flag_saved: Result<(), StoreError> },
}

pub struct SessionNotice<S: NoticeSurface> {
    surface: S,
    state: NoticeState,
}

impl<S: NoticeSurface> SessionNotice<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: NoticeState::Unshown,
        }
    }

    pub fn state(&self) -> NoticeState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == NoticeState::Shown
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn on_load(&mut self, app: &AppState) -> NoticeLoad {
        if self.state != NoticeState::Unshown || app.notice_shown() {
            return NoticeLoad::AlreadyShown;
        }
        if !self.surface.is_present() {
            return NoticeLoad::Missing;
        }
        self.surface.set_visible(true);
        self.surface.set_scroll_locked(true);
        self.surface.focus_acknowledge();
        self.state = NoticeState::Shown;
        NoticeLoad::Shown {
            flag_saved: app.mark_notice_shown(),
        }
    }

    /// Returns true when the notice was visible and is now hidden.
    pub fn dismiss(&mut self) -> bool {
        if self.state != NoticeState::Shown {
            return false;
        }
        self.surface.set_visible(false);
        self.surface.set_scroll_locked(false);
        self.state = NoticeState::Dismissed;
        true
    }
}
