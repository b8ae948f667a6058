// ApexLeads - Theme System
// Light and dark palettes switched through a data attribute on <html>

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

const THEME_STORAGE_KEY: &str = "apexleads_theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Apply theme to the document
pub fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.dyn_into::<HtmlElement>().ok());
    if let Some(html) = root {
        html.set_attribute("data-theme", theme.as_str()).ok();
        let classes = html.class_list();
        match theme {
            Theme::Dark => classes.add_1("dark").ok(),
            Theme::Light => classes.remove_1("dark").ok(),
        };
    }
}

/// Load theme from local storage or return default
pub fn load_theme() -> Theme {
    LocalStorage::get::<String>(THEME_STORAGE_KEY)
        .ok()
        .and_then(|s| Theme::from_str(&s))
        .unwrap_or_default()
}

pub fn save_theme(theme: Theme) {
    let _ = LocalStorage::set(THEME_STORAGE_KEY, theme.as_str());
}

// ===== Theme Context =====

#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    pub theme: Theme,
    pub set_theme: Callback<Theme>,
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Html,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(load_theme);

    {
        let theme = theme.clone();
        use_effect_with(*theme, move |theme| {
            apply_theme(*theme);
            || ()
        });
    }

    let set_theme = {
        let theme = theme.clone();
        Callback::from(move |new_theme: Theme| {
            save_theme(new_theme);
            theme.set(new_theme);
        })
    };

    let ctx = ThemeContext {
        theme: *theme,
        set_theme,
    };

    html! {
        <ContextProvider<ThemeContext> context={ctx}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

/// Hook to access theme context
#[hook]
pub fn use_theme() -> Option<ThemeContext> {
    use_context::<ThemeContext>()
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let Some(theme_ctx) = use_theme() else {
        return html! {};
    };
    let next = theme_ctx.theme.toggled();
    let onclick = theme_ctx.set_theme.reform(move |_: MouseEvent| next);

    html! {
        <button
            {onclick}
            class="p-2 rounded-lg text-gray-500 hover:bg-gray-100 dark:hover:bg-gray-700"
            title={format!("Switch to {} mode", next.as_str())}
        >
            if theme_ctx.theme == Theme::Dark {
                <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 3v1m0 16v1m9-9h-1M4 12H3m15.364 6.364l-.707-.707M6.343 6.343l-.707-.707m12.728 0l-.707.707M6.343 17.657l-.707.707M16 12a4 4 0 11-8 0 4 4 0 018 0z"/>
                </svg>
            } else {
                <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M20.354 15.354A9 9 0 018.646 3.646 9.003 9.003 0 0012 21a9.003 9.003 0 008.354-5.646z"/>
                </svg>
            }
        </button>
    }
}
