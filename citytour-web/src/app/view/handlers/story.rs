use crate::app::state::AppState;
use citytour_core::constants::STORY_EXIT_MS;
use citytour_core::{AdvanceOutcome, Direction, PendingTransition, PlayerHandle, StoryBack, Swipe};
use yew::prelude::*;

/// Announce the visible slide to screen readers.
pub fn announce_slide(state: &AppState) {
    let message = state.read(|session| {
        session.stage().player().map(|player| {
            let n = (player.current_index() + 1).to_string();
            let total = player.len().to_string();
            let title = player.current_slide().title.clone();
            crate::i18n::tr(
                "story.status",
                &[("n", n.as_str()), ("total", total.as_str()), ("title", title.as_str())],
            )
        })
    });
    if let Some(message) = message {
        crate::a11y::set_status(&message);
    }
}

fn start_transition(state: &AppState, outcome: AdvanceOutcome) {
    match outcome {
        AdvanceOutcome::Started(pending) => {
            let Some(handle) = state.read(|session| session.stage().handle()) else {
                return;
            };
            drive_transition(state, handle, pending);
        }
        AdvanceOutcome::Busy => log::debug!("slide change dropped: transition in flight"),
        AdvanceOutcome::AtBoundary | AdvanceOutcome::Stale => {}
    }
}

pub fn build_story_next(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        if state.story_exiting() {
            log::debug!("slide change dropped: story closing");
            return;
        }
        let outcome = state.update(|session| session.advance_story(Direction::Next));
        start_transition(&state, outcome);
    })
}

/// Back one slide; on the first slide the story slides out and the detail
/// page returns.
pub fn build_story_back(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        if state.story_exiting() {
            return;
        }
        let closing = state.read(|session| {
            session
                .stage()
                .player()
                .is_some_and(|player| player.is_at_first_slide() && !player.is_transitioning())
        });
        if closing {
            animate_exit(&state, |state| {
                let back = state.update(|session| session.story_back());
                log::debug!("story closed: {back:?}");
            });
            return;
        }
        match state.update(|session| session.story_back()) {
            StoryBack::Moved(outcome) => start_transition(&state, outcome),
            StoryBack::Exited(exit) => log::debug!("story closed: {exit:?}"),
        }
    })
}

/// Close the story from any slide and return to the map.
pub fn build_story_exit(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        if state.story_exiting() {
            return;
        }
        animate_exit(&state, |state| {
            if let Some(steps) = state.update(|session| session.exit_story_to_map()) {
                super::sections::apply_steps(state, &steps);
            }
        });
    })
}

/// Mark the running player as closing, then run `close` once the slide-out
/// finished. A player disposed meanwhile is left alone.
fn animate_exit(state: &AppState, close: fn(&AppState)) {
    let Some(handle) = state.read(|session| session.stage().handle()) else {
        return;
    };
    state.story_exit.replace(Some(handle));
    state.refresh.force_update();
    after_exit_animation(state, handle, close);
}

fn finish_exit(state: &AppState, handle: PlayerHandle, close: fn(&AppState)) {
    {
        let mut exiting = state.story_exit.borrow_mut();
        if *exiting == Some(handle) {
            *exiting = None;
        }
    }
    if state.read(|session| session.stage().handle()) == Some(handle) {
        close(state);
    } else {
        log::debug!("story already closed before its exit animation ended");
    }
}

#[cfg(target_arch = "wasm32")]
fn after_exit_animation(state: &AppState, handle: PlayerHandle, close: fn(&AppState)) {
    let state = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = crate::dom::sleep_ms(STORY_EXIT_MS).await {
            log::warn!("exit timer: {}", crate::dom::js_error_message(&err));
        }
        finish_exit(&state, handle, close);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn after_exit_animation(state: &AppState, handle: PlayerHandle, close: fn(&AppState)) {
    log::debug!("no browser timer; closing the story without the {STORY_EXIT_MS} ms slide-out");
    finish_exit(state, handle, close);
}

pub fn build_story_swipe(state: &AppState) -> Callback<Swipe> {
    let next = build_story_next(state);
    let back = build_story_back(state);
    Callback::from(move |swipe: Swipe| match swipe {
        Swipe::Left => next.emit(()),
        Swipe::Right => back.emit(()),
    })
}

/// Run the timed steps of one slide change: settle after the text faded
/// out, then either animate in place or preload and cross-fade, then release
/// the lock. Every step re-checks the ticket, so a disposed player or a
/// newer transition silently wins.
#[cfg(target_arch = "wasm32")]
fn drive_transition(state: &AppState, handle: PlayerHandle, pending: PendingTransition) {
    use citytour_core::SettleAction;
    use citytour_core::constants::{CROSSFADE_MS, SETTLE_DELAY_MS, TRANSITION_LOCK_MS};
    use crate::dom::sleep_ms;

    let state = state.clone();
    let ticket = pending.ticket;
    wasm_bindgen_futures::spawn_local(async move {
        if sleep_ms(SETTLE_DELAY_MS).await.is_err() {
            return;
        }
        let action = state.update(|session| session.stage_mut().settle(handle, ticket));
        match action {
            None => return,
            Some(SettleAction::Transform { zoom, height_pct }) => {
                log::debug!("slide {} in place: {zoom:?} at {height_pct}%", pending.to);
                announce_slide(&state);
                if sleep_ms(TRANSITION_LOCK_MS).await.is_err() {
                    return;
                }
            }
            Some(SettleAction::Preload { image }) => {
                match crate::dom::preload_image(&crate::paths::image_path(&image)).await {
                    Ok(()) => {
                        if !state.update(|session| session.stage_mut().image_loaded(handle, ticket))
                        {
                            return;
                        }
                        announce_slide(&state);
                        if sleep_ms(CROSSFADE_MS).await.is_err() {
                            return;
                        }
                    }
                    Err(_) => {
                        if let Some(err) = state
                            .update(|session| session.stage_mut().image_failed(handle, ticket))
                        {
                            log::warn!("{err}");
                            crate::dom::console_error(&err.to_string());
                        }
                        return;
                    }
                }
            }
        }
        state.update(|session| session.stage_mut().finish(handle, ticket));
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn drive_transition(state: &AppState, handle: PlayerHandle, pending: PendingTransition) {
    let _ = (state, handle);
    log::debug!(
        "slide change {} -> {} ({:?}) needs browser timers",
        pending.from,
        pending.to,
        pending.strategy
    );
}
