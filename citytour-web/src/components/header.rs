use crate::i18n::{locales, t};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_lang_change: Callback<String>,
    pub current_lang: String,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let options = locales().iter().map(|meta| {
        html! {
            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
        }
    });
    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <h1 class="header-title">{ t("app.title") }</h1>
                <nav aria-label={t("ui.language")} class="header-right">
                    <label for="lang-select" class="sr-only">{ t("ui.language") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("ui.language")}>
                        { for options }
                    </select>
                </nav>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn header_offers_every_locale() {
        let props = Props {
            on_lang_change: Callback::noop(),
            current_lang: "de".to_string(),
        };
        let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
        assert!(html.contains("Deutsch"), "{html}");
        assert!(html.contains("English"), "{html}");
        assert!(html.contains("lang-select"), "{html}");
    }
}
