pub mod carousel;
pub mod detail_view;
pub mod footer;
pub mod header;
pub mod location_card;
pub mod not_found;
pub mod progress_bar;
pub mod story_view;
