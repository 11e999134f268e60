use crate::app::state::AppState;
use citytour_core::{DetailStep, Direction, StoryHandoff, Swipe};
use yew::prelude::*;

pub fn build_info_step(state: &AppState, direction: Direction) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let step = state.update(|session| match direction {
            Direction::Next => session.next_info(),
            Direction::Previous => session.previous_info(),
        });
        match step {
            DetailStep::Completed { newly_visited: true } => {
                crate::map::restyle(&state.map, &state.session.borrow());
                crate::a11y::set_status(&crate::i18n::t("detail.completed"));
            }
            DetailStep::Advanced { index, .. } => log::debug!("snippet {index}"),
            DetailStep::Completed { .. } | DetailStep::Unchanged => {}
        }
    })
}

/// Swiping left continues into the story. Right swipes are ignored.
pub fn build_detail_swipe(state: &AppState) -> Callback<Swipe> {
    let continue_story = build_continue_story(state);
    Callback::from(move |swipe: Swipe| {
        if swipe == Swipe::Left {
            continue_story.emit(());
        }
    })
}

/// Leave the detail page for its story after the hand-off delay.
pub fn build_continue_story(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(handoff) = state.update(|session| session.continue_to_story()) else {
            return;
        };
        schedule_handoff(&state, handoff);
    })
}

/// Start the story a hand-off points to. Stale hand-offs start nothing.
pub fn begin_story(state: &AppState, handoff: &StoryHandoff) -> bool {
    let started = state.update(|session| session.begin_story(handoff)).is_some();
    if started {
        super::story::announce_slide(state);
    }
    started
}

#[cfg(target_arch = "wasm32")]
fn schedule_handoff(state: &AppState, handoff: StoryHandoff) {
    let state = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if crate::dom::sleep_ms(handoff.delay_ms).await.is_err() {
            return;
        }
        begin_story(&state, &handoff);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_handoff(state: &AppState, handoff: StoryHandoff) {
    let _ = state;
    log::debug!("story `{}` hand-off needs a browser timer", handoff.story);
}
