use crate::app::state::AppState;
use crate::router::Route;
use citytour_core::{LifecycleStep, LocationId, Section};
use yew::prelude::*;
use yew_router::prelude::Navigator;

/// Carry out the side effects of a section switch. Showing and hiding is
/// done by rendering; the map itself is rebuilt by the map hook once the new
/// generation is rendered.
pub fn apply_steps(state: &AppState, steps: &[LifecycleStep]) {
    for step in steps {
        match step {
            LifecycleStep::ResetScroll => crate::dom::scroll_to_top(),
            LifecycleStep::TeardownMap => {
                if crate::map::dispose(&state.map) {
                    log::debug!("map torn down");
                }
            }
            LifecycleStep::InitMap { generation } => {
                log::debug!("map generation {generation} requested");
            }
            LifecycleStep::InitCarousel | LifecycleStep::Hide(_) | LifecycleStep::Show(_) => {}
        }
    }
}

pub fn show_section(state: &AppState, section: Section) {
    let steps = state.update(|session| session.show_section(section));
    apply_steps(state, &steps);
}

/// Open a detail page. Returns whether it opened.
pub fn open_location(state: &AppState, id: LocationId) -> bool {
    let Some(steps) = state.update(|session| session.open_location(id)) else {
        return false;
    };
    apply_steps(state, &steps);
    crate::map::restyle(&state.map, &state.session.borrow());
    true
}

pub fn build_show_section(state: &AppState) -> Callback<Section> {
    let state = state.clone();
    Callback::from(move |section: Section| show_section(&state, section))
}

pub fn build_open_location(state: &AppState) -> Callback<LocationId> {
    let state = state.clone();
    Callback::from(move |id: LocationId| {
        open_location(&state, id);
    })
}

pub fn build_back_to_map(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| show_section(&state, Section::Map))
}

pub fn build_go_home(state: &AppState, navigator: Option<Navigator>) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
        show_section(&state, Section::Home);
    })
}
