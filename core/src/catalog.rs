use crate::role::Role;

pub const DEFAULT_TITLE: &str = "معاينة";
pub const COUNT_SUFFIX: &str = "عناصر";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInfo {
    pub src: String,
    pub title: Option<String>,
    pub role_tag: Option<String>,
}

impl CardInfo {
    pub fn new(src: &str, title: Option<&str>, role_tag: Option<&str>) -> Self {
        Self {
            src: src.to_string(),
            title: title.map(str::to_string),
            role_tag: role_tag.map(str::to_string),
        }
    }

    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref())
    }

    /// `None` for untagged cards, which the filter leaves alone.
    pub fn visibility_for(&self, role: Role) -> Option<bool> {
        let tag = self.role_tag.as_deref().filter(|tag| !tag.is_empty())?;
        Some(tag == role.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visibility: Vec<Option<bool>>,
    pub visible_count: usize,
}

pub fn filter_cards(cards: &[CardInfo], role: Role) -> FilterOutcome {
    let visibility: Vec<Option<bool>> = cards.iter().map(|card| card.visibility_for(role)).collect();
    let visible_count = visibility.iter().filter(|entry| **entry == Some(true)).count();
    FilterOutcome {
        visibility,
        visible_count,
    }
}

pub fn count_label(count: usize) -> String {
    format!("{count} {COUNT_SUFFIX}")
}

pub fn display_title(raw: Option<&str>) -> &str {
    match raw {
        Some(title) if !title.is_empty() => title,
        _ => DEFAULT_TITLE,
    }
}
