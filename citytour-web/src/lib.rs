#![deny(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod dom;
pub mod error;
pub mod gesture;
pub mod i18n;
pub mod map;
pub mod paths;
pub mod router;

pub use error::WebError;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // <html lang> follows the saved locale before the first render
    crate::i18n::set_lang(&crate::i18n::current_lang());
    crate::a11y::apply_reduced_motion(crate::a11y::prefers_reduced_motion());
    yew::Renderer::<app::App>::new().render();
}
