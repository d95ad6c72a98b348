//! Theme preference
//!
//! Light or dark, persisted under the `theme` key and applied as the `dark`
//! class on the document element.

use leptos::*;

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Absent or unrecognised values fall back to light
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

/// Current preference, shared through context
#[derive(Clone, Copy)]
pub struct Theme(pub RwSignal<ThemePreference>);

impl Theme {
    pub fn toggle(&self) {
        self.0.update(|theme| *theme = theme.toggled());
    }

    pub fn is_dark(&self) -> bool {
        self.0.get() == ThemePreference::Dark
    }
}

fn stored() -> ThemePreference {
    let value = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(THEME_KEY).ok().flatten());
    ThemePreference::parse(value.as_deref())
}

fn apply(theme: ThemePreference) {
    let Some(window) = web_sys::window() else {
        return;
    };

    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }

    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let classes = root.class_list();
        let _ = match theme {
            ThemePreference::Dark => classes.add_1("dark"),
            ThemePreference::Light => classes.remove_1("dark"),
        };
    }
}

/// Load the stored preference, keep the document and storage in step with it
pub fn provide_theme() {
    let theme = create_rw_signal(stored());
    create_effect(move |_| apply(theme.get()));
    provide_context(Theme(theme));
}
