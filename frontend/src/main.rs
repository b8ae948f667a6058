use wasm_bindgen::JsValue;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod pages;
mod routes;
mod services;
mod theme;

use components::{layout::Layout, toast::ToastProvider};
use routes::{Route, switch};
use theme::ThemeProvider;

#[function_component(App)]
fn app() -> Html {
    html! {
        <ThemeProvider>
            <ToastProvider>
                <BrowserRouter>
                    <Layout>
                        <Switch<Route> render={switch} />
                    </Layout>
                </BrowserRouter>
            </ToastProvider>
        </ThemeProvider>
    }
}

fn add_stylesheet(href: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let head = document.head().ok_or_else(|| JsValue::from_str("no <head>"))?;

    let link = document.create_element("link")?;
    link.set_attribute("href", href)?;
    link.set_attribute("rel", "stylesheet")?;
    head.append_child(&link)?;
    Ok(())
}

fn main() {
    // Tailwind, the Inter font and the builder canvas styles
    for href in [
        "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css",
        "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap",
        "/static/app.css",
    ] {
        if let Err(err) = add_stylesheet(href) {
            web_sys::console::warn_1(&err);
        }
    }

    theme::apply_theme(theme::load_theme());

    yew::Renderer::<App>::new().render();
}
