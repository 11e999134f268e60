use crate::app::state::AppState;
use yew::prelude::*;

/// Check the bundled content once at startup. Issues are logged; an
/// unusable store leaves the map hidden behind an error notice.
fn bootstrap_check(app_state: &AppState) -> bool {
    let session = app_state.session.borrow();
    let content = session.content();
    for issue in content.issues() {
        log::warn!("content: {issue}");
    }
    match content.validate() {
        Ok(()) => {
            log::info!(
                "tour content ready: {} locations, {} stories",
                content.locations().len(),
                content.stories().len()
            );
            true
        }
        Err(err) => {
            log::error!("tour content unusable: {err}");
            app_state
                .map_error
                .set(Some(AttrValue::from(crate::i18n::t("map.unavailable"))));
            false
        }
    }
}

#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let app_state = app_state.clone();
    use_effect_with((), move |()| {
        bootstrap_check(&app_state);
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use yew::LocalServerRenderer;

    thread_local! {
        static READY: Cell<Option<bool>> = const { Cell::new(None) };
    }

    #[function_component(BootstrapHarness)]
    fn bootstrap_harness() -> Html {
        let app_state = crate::app::state::use_app_state();
        let checked = use_state(|| false);
        if !*checked {
            checked.set(true);
            READY.with(|cell| cell.set(Some(bootstrap_check(&app_state))));
        }
        Html::default()
    }

    #[test]
    fn bundled_content_passes_the_startup_check() {
        let _ = block_on(LocalServerRenderer::<BootstrapHarness>::new().render());
        assert_eq!(READY.with(Cell::get), Some(true));
    }
}
