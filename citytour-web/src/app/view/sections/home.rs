use crate::app::view::AppHandlers;
use crate::i18n::t;
use citytour_core::Section;
use yew::prelude::*;

pub fn render_home(handlers: &AppHandlers) -> Html {
    let start = {
        let show = handlers.show_section.clone();
        Callback::from(move |_| show.emit(Section::Map))
    };
    html! {
        <div class="home">
            <p class="tagline">{ t("app.tagline") }</p>
            <button class="btn btn-primary start" onclick={start}>{ t("app.start") }</button>
        </div>
    }
}
