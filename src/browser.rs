use crate::{
    contact::{ContactError, ContactMessage, EmailJsConfig, EMAILJS_SEND_URL},
    scroll::{Extent, ScrollSample, SectionGeometry},
    theme::{resolve_theme, Theme, THEME_STORAGE_KEY},
};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_net::http::Request;
use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage,
};

const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

impl SectionGeometry for Element {
    fn extent(&self) -> Option<Extent> {
        if !self.is_connected() {
            return None;
        }

        let offset = window()?.scroll_y().ok()?;
        let rect = self.get_bounding_client_rect();
        let extent = Extent::new(rect.top() + offset, rect.bottom() + offset);

        (extent.top.is_finite() && extent.bottom.is_finite()).then_some(extent)
    }
}

pub fn scroll_sample() -> ScrollSample {
    let Some(win) = window() else {
        return ScrollSample {
            offset: 0.0,
            viewport_height: FALLBACK_VIEWPORT_HEIGHT,
            document_height: FALLBACK_VIEWPORT_HEIGHT,
        };
    };

    let offset = win.scroll_y().unwrap_or(0.0);
    let viewport_height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);
    let document_height = win
        .document()
        .and_then(|document| document.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(viewport_height);

    ScrollSample {
        offset,
        viewport_height,
        document_height,
    }
}

pub fn smooth_scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Passive window listeners for scroll and resize; dropping the returned
/// listeners detaches them.
pub fn listen_viewport(on_change: impl Fn() + Clone + 'static) -> Vec<EventListener> {
    let Some(win) = window() else {
        return Vec::new();
    };

    let passive = EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: true,
    };

    ["scroll", "resize"]
        .into_iter()
        .map(|event_type| {
            let on_change = on_change.clone();
            EventListener::new_with_options(&win, event_type, passive, move |_event| on_change())
        })
        .collect()
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn read_stored_theme() -> Option<String> {
    local_storage()?.get_item(THEME_STORAGE_KEY).ok().flatten()
}

fn media_matches(query: &str) -> Option<bool> {
    window()?
        .match_media(query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
}

pub fn initial_theme() -> Theme {
    resolve_theme(
        read_stored_theme().as_deref(),
        media_matches("(prefers-color-scheme: dark)"),
    )
}

pub fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

pub fn apply_theme(theme: Theme) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let _ = root.set_attribute("data-theme", theme.as_str());
    let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
}

fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)").unwrap_or(false)
}

pub fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition
        .call1(&document_js, &callback)
        .is_err()
    {
        apply_theme(theme);
    }
}

pub async fn send_contact_message(
    config: &EmailJsConfig,
    message: &ContactMessage,
) -> Result<(), ContactError> {
    let response = Request::post(EMAILJS_SEND_URL)
        .json(&config.request(message))
        .map_err(|error| ContactError::Transport(error.to_string()))?
        .send()
        .await
        .map_err(|error| ContactError::Transport(error.to_string()))?;

    if !response.ok() {
        return Err(ContactError::Rejected(response.status()));
    }

    Ok(())
}
