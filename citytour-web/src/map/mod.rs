//! The map section's live Leaflet instance.
//!
//! At most one [`MapRuntime`] exists at a time. It lives in the app's
//! [`MapSlot`], is created when the map section is entered with a new
//! generation and disposed (listeners included) before the next one is built.
//! Off the browser the runtime is a recorder so handlers stay testable.

// wasm-bindgen import shims expand to unsafe blocks
#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
mod leaflet;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(not(target_arch = "wasm32"))]
mod stub;

#[cfg(target_arch = "wasm32")]
pub use runtime::{MapContext, MapRuntime};
#[cfg(not(target_arch = "wasm32"))]
pub use stub::MapRuntime;

use citytour_core::{FlyTo, Location, TourSession};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// DOM id of the map container.
pub const MAP_CONTAINER_ID: &str = "map-container";

pub type MapSlot = Rc<RefCell<Option<MapRuntime>>>;

/// Leaflet marker options. Locked markers get no pointer cursor, no tab
/// stop and no listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerOptions {
    pub interactive: bool,
    pub keyboard: bool,
}

impl MarkerOptions {
    #[must_use]
    pub const fn for_location(location: &Location) -> Self {
        let enabled = !location.is_locked();
        Self {
            interactive: enabled,
            keyboard: enabled,
        }
    }
}

#[must_use]
pub fn empty_slot() -> MapSlot {
    Rc::new(RefCell::new(None))
}

/// Fly the live map, if any, to the focused location and refresh marker
/// icons.
pub fn focus(slot: &MapSlot, session: &TourSession, fly_to: Option<FlyTo>) {
    let mut guard = slot.borrow_mut();
    let Some(runtime) = guard.as_mut() else {
        return;
    };
    if let Some(target) = fly_to {
        runtime.fly_to(target);
        if let Some(id) = session.carousel().current_location() {
            runtime.open_popup(id);
        }
    }
    runtime.restyle(session);
}

/// Refresh marker icons only.
pub fn restyle(slot: &MapSlot, session: &TourSession) {
    focus(slot, session, None);
}

/// Tear the live map down. Returns whether one was running.
pub fn dispose(slot: &MapSlot) -> bool {
    let taken = slot.borrow_mut().take();
    match taken {
        Some(runtime) => {
            runtime.dispose();
            true
        }
        None => false,
    }
}
