use crate::app::state::AppState;
use crate::app::view::AppHandlers;
use citytour_core::KeyCommand;

/// Route a key command to its handler.
pub fn dispatch(command: KeyCommand, handlers: &AppHandlers, state: &AppState) {
    match command {
        KeyCommand::StoryNext => handlers.story_next.emit(()),
        KeyCommand::StoryPrevious => handlers.story_back.emit(()),
        KeyCommand::InfoNext => handlers.info_next.emit(()),
        KeyCommand::InfoPrevious => handlers.info_previous.emit(()),
        KeyCommand::CarouselNext => handlers.carousel_next.emit(()),
        KeyCommand::CarouselPrevious => handlers.carousel_previous.emit(()),
        KeyCommand::BackToMap => {
            if state.read(citytour_core::TourSession::story_active) {
                handlers.story_exit.emit(());
            } else {
                handlers.back_to_map.emit(());
            }
        }
    }
}

/// Translate a `KeyboardEvent.key` in the session's current context.
#[must_use]
pub fn command_for_key(key: &str, state: &AppState) -> Option<KeyCommand> {
    let context = state.read(citytour_core::TourSession::key_context);
    KeyCommand::from_key(key, context)
}

/// Listen for arrow keys and Escape on the document while the app is
/// mounted.
#[cfg(target_arch = "wasm32")]
#[yew::hook]
pub fn use_keyboard(state: &AppState, handlers: &AppHandlers) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let state = state.clone();
    let handlers = handlers.clone();
    yew::use_effect_with((), move |()| {
        let listener = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| {
                if let Some(command) = command_for_key(&event.key(), &state) {
                    event.prevent_default();
                    dispatch(command, &handlers, &state);
                }
            },
        );
        let document = crate::dom::document();
        if let Some(doc) = document.as_ref() {
            let _ = doc
                .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
        }
        move || {
            if let Some(doc) = document.as_ref() {
                let _ = doc.remove_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytour_core::Section;
    use futures::executor::block_on;
    use std::cell::Cell;
    use yew::LocalServerRenderer;
    use yew::prelude::*;

    thread_local! {
        static RESULT: Cell<Option<(Section, Option<u32>, bool)>> = const { Cell::new(None) };
    }

    #[function_component(KeyHarness)]
    fn key_harness() -> Html {
        let state = crate::app::state::use_app_state();
        let ran = use_mut_ref(|| false);
        if !*ran.borrow() {
            *ran.borrow_mut() = true;
            let handlers = AppHandlers::new(&state, None);
            assert_eq!(command_for_key("ArrowRight", &state), Some(KeyCommand::CarouselNext));
            assert_eq!(command_for_key("Escape", &state), None);

            handlers.open_location.emit(4);
            for key in ["ArrowRight", "ArrowLeft", "ArrowRight"] {
                if let Some(command) = command_for_key(key, &state) {
                    dispatch(command, &handlers, &state);
                }
            }
            let completed_before_escape =
                state.read(|session| session.detail_page().is_some_and(|page| page.completed));
            if let Some(command) = command_for_key("Escape", &state) {
                dispatch(command, &handlers, &state);
            }
            let seen = state.read(|session| {
                (
                    session.section(),
                    session.carousel().current_location(),
                    completed_before_escape,
                )
            });
            RESULT.with(|cell| cell.set(Some(seen)));
        }
        Html::default()
    }

    #[test]
    fn keys_follow_the_active_context() {
        let _ = block_on(LocalServerRenderer::<KeyHarness>::new().render());
        assert_eq!(
            RESULT.with(Cell::get),
            Some((Section::Map, Some(4), false))
        );
    }
}
