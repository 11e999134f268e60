use crate::app::state::AppState;
use citytour_core::{Direction, LocationId, MarkerClick, Swipe};
use yew::prelude::*;

pub fn build_carousel_step(state: &AppState, direction: Direction) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let fly_to = state.update(|session| session.carousel_mut().step(direction));
        crate::map::focus(&state.map, &state.session.borrow(), fly_to);
    })
}

/// Cards and markers share one rule: the first click focuses, a click on
/// the focused location opens it.
pub fn build_location_click(state: &AppState) -> Callback<LocationId> {
    let state = state.clone();
    Callback::from(move |id: LocationId| {
        let click = state.update(|session| session.carousel_mut().marker_clicked(id));
        match click {
            MarkerClick::OpenDetail(id) => {
                super::sections::open_location(&state, id);
            }
            MarkerClick::Focus { fly_to, .. } => {
                crate::map::focus(&state.map, &state.session.borrow(), Some(fly_to));
            }
            MarkerClick::Ignored => log::debug!("location {id} takes no input"),
        }
    })
}

/// `(id, entered)` from markers and cards.
pub fn build_hover(state: &AppState) -> Callback<(LocationId, bool)> {
    let state = state.clone();
    Callback::from(move |(id, entered): (LocationId, bool)| {
        let changed = {
            let mut session = state.session.borrow_mut();
            if entered {
                session.carousel_mut().hover_start(id)
            } else {
                session.carousel_mut().hover_end(id)
            }
        };
        if changed {
            crate::map::restyle(&state.map, &state.session.borrow());
            state.refresh.force_update();
        }
    })
}

/// Swiping left reveals the next card.
pub fn build_carousel_swipe(state: &AppState) -> Callback<Swipe> {
    let next = build_carousel_step(state, Direction::Next);
    let previous = build_carousel_step(state, Direction::Previous);
    Callback::from(move |swipe: Swipe| match swipe {
        Swipe::Left => next.emit(()),
        Swipe::Right => previous.emit(()),
    })
}
