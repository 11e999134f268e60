mod detail;
mod home;
mod map;

use crate::app::state::AppState;
use crate::app::view::AppHandlers;
use citytour_core::Section;
use yew::prelude::*;

/// All three sections stay mounted; only the current one is visible. The
/// map container must survive a detour through the detail page.
pub fn render_sections(state: &AppState, handlers: &AppHandlers) -> Html {
    let current = state.read(citytour_core::TourSession::section);
    let section = |which: Section, body: Html| {
        html! {
            <section id={which.id()} class={classes!("tour-section", which.id())}
                hidden={which != current} aria-hidden={(which != current).to_string()}>
                { body }
            </section>
        }
    };
    html! {
        <>
            { section(Section::Home, home::render_home(handlers)) }
            { section(Section::Map, map::render_map(state, handlers)) }
            { section(Section::LocationDetail, detail::render_detail(state, handlers)) }
        </>
    }
}
