use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

pub const THEME_STORAGE_KEY: &str = "theme";
pub const DEFAULT_THEME: Theme = Theme::Dark;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} mode")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀",
            Self::Dark => "☾",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Stored choice first, then the system colour-scheme preference.
pub fn resolve_theme(stored: Option<&str>, system_prefers_dark: Option<bool>) -> Theme {
    if let Some(theme) = stored.and_then(Theme::parse) {
        return theme;
    }

    match system_prefers_dark {
        Some(true) => Theme::Dark,
        Some(false) => Theme::Light,
        None => DEFAULT_THEME,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ThemeListener = Rc<dyn Fn(Theme)>;

/// Current theme plus the components that want to hear about changes.
///
/// Listeners run after every internal borrow is released, so a listener may
/// read the state, subscribe, or unsubscribe from inside its callback.
pub struct ThemeState {
    current: Cell<Theme>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, ThemeListener)>>,
}

impl ThemeState {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: Cell::new(initial),
            next_id: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn subscribe(&self, listener: impl Fn(Theme) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `false` without notifying when `theme` is already current.
    pub fn set(&self, theme: Theme) -> bool {
        if self.current.get() == theme {
            return false;
        }

        self.current.set(theme);
        let listeners: Vec<ThemeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(theme);
        }
        true
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_theme_wins_over_system_preference() {
        assert_eq!(resolve_theme(Some("light"), Some(true)), Theme::Light);
        assert_eq!(resolve_theme(Some("dark"), Some(false)), Theme::Dark);
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system_then_dark() {
        assert_eq!(resolve_theme(Some("sepia"), Some(false)), Theme::Light);
        assert_eq!(resolve_theme(None, Some(true)), Theme::Dark);
        assert_eq!(resolve_theme(None, None), Theme::Dark);
    }

    #[test]
    fn toggle_label_names_the_next_theme() {
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light mode");
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark mode");
        assert!(Theme::Dark.pressed());
    }

    #[test]
    fn subscribers_hear_changes_but_not_repeats() {
        let state = ThemeState::new(Theme::Dark);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        state.subscribe(move |theme| sink.borrow_mut().push(theme));

        assert!(state.set(Theme::Light));
        assert!(!state.set(Theme::Light));
        assert_eq!(state.toggle(), Theme::Dark);

        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let state = ThemeState::new(Theme::Light);
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let id = state.subscribe(move |_| counter.set(counter.get() + 1));
        state.toggle();

        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.toggle();

        assert_eq!(calls.get(), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn listener_may_read_and_subscribe_reentrantly() {
        let state = Rc::new(ThemeState::new(Theme::Light));
        let observed = Rc::new(Cell::new(None));

        let inner_state = Rc::clone(&state);
        let inner_observed = Rc::clone(&observed);
        state.subscribe(move |_| {
            inner_observed.set(Some(inner_state.current()));
            inner_state.subscribe(|_| ());
        });

        state.toggle();
        assert_eq!(observed.get(), Some(Theme::Dark));
        assert_eq!(state.subscriber_count(), 2);
    }
}
