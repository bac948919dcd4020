use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use waraq_core::{classify_event, classify_key, KeyModifiers, GUARDED_EVENTS, INTERACTIVE_SELECTOR};
use web_sys::{Event, EventTarget, KeyboardEvent};

use crate::dom;

fn target_is_interactive(event: &Event) -> bool {
    dom::target_element(event.target())
        .and_then(|element| dom::closest(&element, INTERACTIVE_SELECTOR))
        .is_some()
}

fn key_modifiers(event: &KeyboardEvent) -> KeyModifiers {
    KeyModifiers {
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        shift: event.shift_key(),
    }
}

/// Installs the copy/inspect guard on `target`. Dropping the listeners removes it.
pub(crate) fn install(target: &EventTarget) -> Vec<EventListener> {
    let mut listeners = Vec::with_capacity(GUARDED_EVENTS.len() + 1);
    for &event_type in GUARDED_EVENTS {
        listeners.push(EventListener::new_with_options(
            target,
            event_type,
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let suppression = classify_event(&event.type_());
                if suppression.should_prevent(target_is_interactive(event)) {
                    event.prevent_default();
                }
            },
        ));
    }
    listeners.push(EventListener::new_with_options(
        target,
        "keydown",
        EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        },
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let suppression = classify_key(&event.key(), key_modifiers(event));
            if suppression.should_prevent(target_is_interactive(event)) {
                event.prevent_default();
            }
        },
    ));
    listeners
}
