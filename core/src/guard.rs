pub const INTERACTIVE_SELECTOR: &str = "input, textarea, [contenteditable=\"true\"], .allow-select";

/// Events suppressed outright unless the target is interactive.
pub const GUARDED_EVENTS: &[&str] = &["contextmenu", "dragstart", "selectstart", "copy", "cut", "paste"];

const CLIPBOARD_KEYS: &[&str] = &["c", "x", "v", "s", "p", "u"];
const DEVTOOLS_KEYS: &[&str] = &["i", "j"];
const DEVTOOLS_FUNCTION_KEY: &str = "F12";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyModifiers {
    fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suppression {
    None,
    UnlessInteractive,
    Always,
}

impl Suppression {
    pub fn should_prevent(self, target_interactive: bool) -> bool {
        match self {
            Suppression::None => false,
            Suppression::UnlessInteractive => !target_interactive,
            Suppression::Always => true,
        }
    }
}

pub fn classify_key(key: &str, modifiers: KeyModifiers) -> Suppression {
    if key == DEVTOOLS_FUNCTION_KEY {
        return Suppression::Always;
    }
    let lowered = key.to_lowercase();
    if modifiers.command() && modifiers.shift && DEVTOOLS_KEYS.contains(&lowered.as_str()) {
        return Suppression::Always;
    }
    if modifiers.command() && CLIPBOARD_KEYS.contains(&lowered.as_str()) {
        return Suppression::UnlessInteractive;
    }
    Suppression::None
}

pub fn classify_event(event_type: &str) -> Suppression {
    if GUARDED_EVENTS.contains(&event_type) {
        Suppression::UnlessInteractive
    } else {
        Suppression::None
    }
}
