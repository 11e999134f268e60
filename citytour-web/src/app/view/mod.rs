pub mod handlers;
mod sections;

pub use handlers::AppHandlers;

use crate::app::state::AppState;
use crate::router::Route;
use yew::prelude::*;

pub fn render_app(state: &AppState, handlers: &AppHandlers, route: Option<&Route>) -> Html {
    let section = state.read(citytour_core::TourSession::section);
    let main_view = if matches!(route, Some(Route::NotFound)) {
        html! { <crate::components::not_found::NotFound on_home={handlers.go_home.clone()} /> }
    } else {
        sections::render_sections(state, handlers)
    };

    html! {
        <>
            if section.shows_header() {
                <crate::components::header::Header
                    on_lang_change={handlers.lang_change.clone()}
                    current_lang={(*state.current_language).clone()}
                />
            }
            <main id="main" role="main">
                <style>{ crate::a11y::visible_focus_css() }</style>
                <div id={crate::a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
                { main_view }
            </main>
            <crate::components::footer::Footer />
        </>
    }
}
