use crate::catalog::{count_label, filter_cards, CardInfo};
use crate::role::Role;

pub trait CatalogSurface {
    /// Active styling on the button whose role matches, inactive on the rest.
    fn mark_active_role(&self, role: Role);
    fn set_grid_visible(&self, visible: bool);
    fn set_prompt_visible(&self, visible: bool);
    fn set_theme(&self, role: Role);
    fn cards(&self) -> Vec<CardInfo>;
    fn set_card_visible(&self, index: usize, visible: bool);
    fn show_count(&self, label: &str);
}

pub struct RoleFilter<C: CatalogSurface> {
    surface: C,
    active: Option<Role>,
}

impl<C: CatalogSurface> RoleFilter<C> {
    pub fn new(surface: C) -> Self {
        Self {
            surface,
            active: None,
        }
    }

    pub fn active(&self) -> Option<Role> {
        self.active
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    /// Applies the display side of a role selection and returns the visible count.
    pub fn apply(&mut self, role: Role) -> usize {
        self.surface.mark_active_role(role);
        self.surface.set_grid_visible(true);
        self.surface.set_prompt_visible(false);
        self.surface.set_theme(role);

        let cards = self.surface.cards();
        let outcome = filter_cards(&cards, role);
        for (index, visible) in outcome.visibility.iter().enumerate() {
            if let Some(visible) = visible {
                self.surface.set_card_visible(index, *visible);
            }
        }
        self.surface.show_count(&count_label(outcome.visible_count));
        self.active = Some(role);
        outcome.visible_count
    }
}
