mod carousel;
mod detail;
mod prefs;
mod sections;
mod story;

use crate::app::state::AppState;
use citytour_core::{Direction, LocationId, Section, Swipe};
use yew::prelude::*;
use yew_router::prelude::Navigator;

pub use carousel::{build_carousel_step, build_carousel_swipe, build_hover, build_location_click};
pub use detail::{begin_story, build_continue_story, build_detail_swipe, build_info_step};
pub use prefs::{build_lang_change, build_reduced_motion};
pub use sections::{
    apply_steps, build_back_to_map, build_go_home, build_open_location, build_show_section,
    open_location, show_section,
};
pub use story::{
    announce_slide, build_story_back, build_story_exit, build_story_next, build_story_swipe,
};

#[derive(Clone)]
pub struct AppHandlers {
    pub show_section: Callback<Section>,
    pub open_location: Callback<LocationId>,
    pub back_to_map: Callback<()>,
    pub go_home: Callback<()>,
    pub carousel_next: Callback<()>,
    pub carousel_previous: Callback<()>,
    pub carousel_swipe: Callback<Swipe>,
    pub location_click: Callback<LocationId>,
    pub hover: Callback<(LocationId, bool)>,
    pub info_next: Callback<()>,
    pub info_previous: Callback<()>,
    pub detail_swipe: Callback<Swipe>,
    pub continue_story: Callback<()>,
    pub story_next: Callback<()>,
    pub story_back: Callback<()>,
    pub story_exit: Callback<()>,
    pub story_swipe: Callback<Swipe>,
    pub lang_change: Callback<String>,
    pub reduced_motion: Callback<bool>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState, navigator: Option<Navigator>) -> Self {
        Self {
            show_section: build_show_section(state),
            open_location: build_open_location(state),
            back_to_map: build_back_to_map(state),
            go_home: build_go_home(state, navigator),
            carousel_next: build_carousel_step(state, Direction::Next),
            carousel_previous: build_carousel_step(state, Direction::Previous),
            carousel_swipe: build_carousel_swipe(state),
            location_click: build_location_click(state),
            hover: build_hover(state),
            info_next: build_info_step(state, Direction::Next),
            info_previous: build_info_step(state, Direction::Previous),
            detail_swipe: build_detail_swipe(state),
            continue_story: build_continue_story(state),
            story_next: build_story_next(state),
            story_back: build_story_back(state),
            story_exit: build_story_exit(state),
            story_swipe: build_story_swipe(state),
            lang_change: build_lang_change(state),
            reduced_motion: build_reduced_motion(state),
        }
    }
}
