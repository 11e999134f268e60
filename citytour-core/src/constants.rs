//! Centralized timing, geometry and map tuning for the tour.
//!
//! Animation durations mirror the CSS transitions in the stylesheet; change
//! both together.

use crate::content::{Coordinate, LocationId};

// Content ------------------------------------------------------------------
/// Locations with an id at or above this value are not unlocked yet.
pub const FIRST_LOCKED_LOCATION_ID: LocationId = 5;

// Story player -------------------------------------------------------------
/// Fade-out time of the slide text before the slide state is swapped.
pub const SETTLE_DELAY_MS: u32 = 300;
/// Cross-fade between two slides with different images.
pub const CROSSFADE_MS: u32 = 800;
/// The transition lock is held this long after the swap.
pub const TRANSITION_LOCK_MS: u32 = 800;
/// Delay between leaving the detail page and starting the story.
pub const STORY_HANDOFF_DELAY_MS: u32 = 500;
/// Slide-in/slide-out animation between story and detail page.
pub const STORY_EXIT_MS: u32 = 300;

// Detail page --------------------------------------------------------------
pub const HIGHLIGHT_ZOOM: f64 = 2.5;

// Input --------------------------------------------------------------------
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

// Carousel -----------------------------------------------------------------
pub const CARD_WIDTH_PX: f64 = 236.0;
pub const CAROUSEL_CENTER_DIVISOR: f64 = 1.75;

// Map ----------------------------------------------------------------------
pub const MAP_HOME: Coordinate = Coordinate {
    lat: 51.718_95,
    lng: 8.7547,
};
pub const MAP_HOME_ZOOM: f64 = 14.0;
pub const FLY_TO_ZOOM: f64 = 17.0;
pub const FLY_TO_DURATION_S: f64 = 1.0;
pub const FLY_TO_EASE_LINEARITY: f64 = 0.5;
pub const FLY_TO_OFFSET: (f64, f64) = (0.0, -150.0);
pub const TILE_URL: &str =
    "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const TILE_MAX_ZOOM: u8 = 19;
pub const TILE_KEEP_BUFFER: u8 = 8;
pub const INVALIDATE_SIZE_DELAY_MS: u32 = 100;
pub const VIEWPORT_DEBOUNCE_MS: u32 = 150;
pub const MARKER_ICON_SIZE: (u32, u32) = (50, 50);
pub const MARKER_ICON_ANCHOR: (u32, u32) = (15, 30);
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (0, -30);
