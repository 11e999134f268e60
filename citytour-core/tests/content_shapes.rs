use citytour_core::constants::FIRST_LOCKED_LOCATION_ID;
use citytour_core::{Category, ContentStore, StoryId, TourError};

const LOCATIONS: &str = include_str!("../../citytour-web/static/assets/data/locations.json");
const STORIES: &str = include_str!("../../citytour-web/static/assets/data/stories.json");

#[test]
fn bundled_json_validates() {
    let store = ContentStore::from_json(LOCATIONS, STORIES).unwrap();
    store.validate().unwrap();
    assert!(store.locations().iter().all(|l| !l.visited));
}

#[test]
fn every_unlocked_story_location_resolves() {
    let store = ContentStore::from_json(LOCATIONS, STORIES).unwrap();
    for location in store.locations() {
        if location.story.is_some() {
            assert!(!location.is_locked());
            let story = store.story_for_location(location.id).unwrap();
            assert!(!story.slides.is_empty(), "story `{}` is empty", story.id);
        }
    }
    assert!(matches!(
        store.story_for_location(4),
        Err(TourError::NoStory(4))
    ));
}

#[test]
fn door_stories_keep_their_slide_counts() {
    let store = ContentStore::from_json(LOCATIONS, STORIES).unwrap();
    let count = |id: &str| store.story(&StoryId::new(id)).unwrap().slides.len();
    assert_eq!(count("right-door"), 6);
    assert_eq!(count("left-door"), 7);
    assert_eq!(count("farmer-craftsman"), 2);
}

#[test]
fn locked_locations_start_at_threshold() {
    let store = ContentStore::from_json(LOCATIONS, STORIES).unwrap();
    let locked: Vec<_> = store
        .locations()
        .iter()
        .filter(|l| l.is_locked())
        .map(|l| l.id)
        .collect();
    assert!(!locked.is_empty());
    assert!(locked.iter().all(|id| *id >= FIRST_LOCKED_LOCATION_ID));
    assert_eq!(store.location(1).unwrap().category, Category::Door);
}

#[test]
fn malformed_json_is_a_content_error() {
    assert!(matches!(
        ContentStore::from_json("{\"locations\": 3}", STORIES),
        Err(TourError::Content(_))
    ));
}

#[test]
fn validation_reports_dangling_story_reference() {
    let broken = LOCATIONS.replace("\"farmer-craftsman\"", "\"ghost\"");
    let store = ContentStore::from_json(&broken, STORIES).unwrap();
    assert!(matches!(store.validate(), Err(TourError::InvalidContent(_))));
    assert!(store.issues().iter().any(|issue| issue.contains("ghost")));
}
