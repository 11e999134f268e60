use crate::app::state::AppState;
use yew::prelude::*;

pub fn build_lang_change(state: &AppState) -> Callback<String> {
    let current_language = state.current_language.clone();
    Callback::from(move |code: String| {
        crate::i18n::set_lang(&code);
        current_language.set(crate::i18n::current_lang());
    })
}

pub fn build_reduced_motion(state: &AppState) -> Callback<bool> {
    let reduced_motion = state.reduced_motion.clone();
    Callback::from(move |enabled: bool| {
        crate::a11y::apply_reduced_motion(enabled);
        reduced_motion.set(enabled);
    })
}
