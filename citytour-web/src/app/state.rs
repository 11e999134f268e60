use crate::map::MapSlot;
use citytour_core::{PlayerHandle, TourSession};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Everything the shell renders from.
///
/// The tour session lives behind a shared cell so timers and map listeners
/// always act on the latest state; `refresh` re-renders after a change.
#[derive(Clone)]
pub struct AppState {
    pub session: Rc<RefCell<TourSession>>,
    pub map: MapSlot,
    pub refresh: UseForceUpdateHandle,
    pub current_language: UseStateHandle<String>,
    pub reduced_motion: UseStateHandle<bool>,
    /// Shown in place of the map when it could not be built.
    pub map_error: UseStateHandle<Option<AttrValue>>,
    /// Player whose slide-out animation is running. Story input is dropped
    /// until it closes.
    pub story_exit: Rc<RefCell<Option<PlayerHandle>>>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        session: use_mut_ref(TourSession::default),
        map: use_mut_ref(|| None),
        refresh: use_force_update(),
        current_language: use_state(crate::i18n::current_lang),
        reduced_motion: use_state(crate::a11y::prefers_reduced_motion),
        map_error: use_state(|| None::<AttrValue>),
        story_exit: use_mut_ref(|| None),
    }
}

impl AppState {
    /// Mutate the session and re-render.
    pub fn update<R>(&self, f: impl FnOnce(&mut TourSession) -> R) -> R {
        let result = f(&mut self.session.borrow_mut());
        self.refresh.force_update();
        result
    }

    /// Whether the running story is animating out.
    #[must_use]
    pub fn story_exiting(&self) -> bool {
        let exiting = *self.story_exit.borrow();
        exiting.is_some() && exiting == self.read(|session| session.stage().handle())
    }

    /// Read the session without re-rendering.
    pub fn read<R>(&self, f: impl FnOnce(&TourSession) -> R) -> R {
        f(&self.session.borrow())
    }
}
