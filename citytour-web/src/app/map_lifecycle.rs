use crate::app::state::AppState;
use crate::app::view::AppHandlers;
use crate::map::{MapContext, MapRuntime};
use yew::prelude::*;

/// Build the Leaflet map whenever the map section asks for a new
/// generation, and dispose of it when that generation is superseded.
#[hook]
pub fn use_map_runtime(state: &AppState, handlers: &AppHandlers) {
    let deps = state.read(|session| {
        let sections = session.sections();
        (sections.map_live(), sections.map_generation())
    });
    let state = state.clone();
    let on_marker_click = handlers.location_click.clone();
    let on_marker_hover = handlers.hover.clone();
    use_effect_with(deps, move |&(live, generation)| {
        if live {
            crate::map::dispose(&state.map);
            let ctx = MapContext {
                session: state.session.clone(),
                slot: state.map.clone(),
                on_marker_click,
                on_marker_hover,
            };
            match MapRuntime::mount(&ctx, generation) {
                Ok(runtime) => {
                    state.map.replace(Some(runtime));
                    crate::map::restyle(&state.map, &state.session.borrow());
                    if state.map_error.is_some() {
                        state.map_error.set(None);
                    }
                }
                Err(err) => {
                    log::error!("map unavailable: {err}");
                    crate::dom::console_error(&err.to_string());
                    state
                        .map_error
                        .set(Some(AttrValue::from(crate::i18n::t("map.unavailable"))));
                }
            }
        }
        let slot = state.map.clone();
        move || {
            let current = slot
                .borrow()
                .as_ref()
                .is_some_and(|runtime| runtime.generation() == generation);
            if current {
                crate::map::dispose(&slot);
            }
        }
    });
}
