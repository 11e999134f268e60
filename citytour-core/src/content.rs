//! Static tour content: locations and the stories told about them.
//!
//! The store is loaded once at startup and is read-only apart from the
//! `visited` flag on each location.

use crate::constants::FIRST_LOCKED_LOCATION_ID;
use crate::error::TourError;
use crate::highlight::HighlightArea;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const DEFAULT_LOCATIONS_DATA: &str =
    include_str!("../../citytour-web/static/assets/data/locations.json");
const DEFAULT_STORIES_DATA: &str =
    include_str!("../../citytour-web/static/assets/data/stories.json");

pub type LocationId = u32;

/// Stable key of a story definition, referenced from [`Location::story`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Marker styling category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Building,
    Door,
    Sculpture,
    Church,
    Nature,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Door => "door",
            Self::Sculpture => "sculpture",
            Self::Church => "church",
            Self::Nature => "nature",
        }
    }
}

/// A point of interest shown on the map and in the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub coord: Coordinate,
    #[serde(default)]
    pub category: Category,
    pub image: String,
    /// Snippets shown one at a time on the detail page.
    #[serde(default)]
    pub info: Vec<String>,
    /// Image regions focused per snippet, used cyclically.
    #[serde(default)]
    pub highlight_areas: Vec<HighlightArea>,
    #[serde(default)]
    pub maps_url: Option<String>,
    #[serde(default)]
    pub story: Option<StoryId>,
    /// Overview pages link to their children instead of paging snippets.
    #[serde(default)]
    pub overview: bool,
    #[serde(default)]
    pub children: Vec<LocationId>,
    #[serde(default)]
    pub visited: bool,
}

impl Location {
    /// Locked locations are rendered but never focusable or navigable.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.id >= FIRST_LOCKED_LOCATION_ID
    }
}

/// Zoom and pan applied to a slide image; offsets are signed percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom {
    #[serde(default = "Zoom::default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Zoom {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        x: 0.0,
        y: 0.0,
    };

    const fn default_scale() -> f64 {
        1.0
    }

    /// CSS `transform` value for this zoom.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("scale({}) translate({}%, {}%)", self.scale, self.x, self.y)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub zoom: Option<Zoom>,
    /// Image viewport height in percent; full height when absent.
    #[serde(default)]
    pub height: Option<f64>,
}

impl Slide {
    #[must_use]
    pub fn zoom_or_identity(&self) -> Zoom {
        self.zoom.unwrap_or_default()
    }

    #[must_use]
    pub fn height_pct(&self) -> f64 {
        self.height.unwrap_or(100.0)
    }

    #[must_use]
    pub fn shares_image_with(&self, other: &Self) -> bool {
        self.image == other.image
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Deserialize)]
struct LocationsFile {
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct StoriesFile {
    stories: Vec<Story>,
}

static DEFAULT_STORE: Lazy<ContentStore> = Lazy::new(|| {
    ContentStore::from_json(DEFAULT_LOCATIONS_DATA, DEFAULT_STORIES_DATA).unwrap_or_else(|err| {
        log::error!("bundled tour content failed to parse: {err}");
        ContentStore::default()
    })
});

/// All locations (in tour order) and stories of the tour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentStore {
    locations: Vec<Location>,
    stories: Vec<Story>,
}

impl ContentStore {
    /// Build a store, ordering locations by id.
    #[must_use]
    pub fn new(mut locations: Vec<Location>, stories: Vec<Story>) -> Self {
        locations.sort_by_key(|l| l.id);
        Self { locations, stories }
    }

    /// Parse the `locations.json` and `stories.json` documents.
    ///
    /// # Errors
    ///
    /// Returns an error if either document is not valid content JSON.
    pub fn from_json(locations_json: &str, stories_json: &str) -> Result<Self, TourError> {
        let locations: LocationsFile = serde_json::from_str(locations_json)?;
        let stories: StoriesFile = serde_json::from_str(stories_json)?;
        Ok(Self::new(locations.locations, stories.stories))
    }

    /// Fresh copy of the content bundled with the web crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        DEFAULT_STORE.clone()
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn location_index(&self, id: LocationId) -> Option<usize> {
        self.locations.iter().position(|l| l.id == id)
    }

    #[must_use]
    pub fn story(&self, id: &StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| &s.id == id)
    }

    /// The story referenced by a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown, has no story reference,
    /// or references a story that does not exist.
    pub fn story_for_location(&self, id: LocationId) -> Result<&Story, TourError> {
        let location = self.location(id).ok_or(TourError::UnknownLocation(id))?;
        let story_id = location.story.as_ref().ok_or(TourError::NoStory(id))?;
        self.story(story_id)
            .ok_or_else(|| TourError::UnknownStory(story_id.clone()))
    }

    /// Mark a location visited. Returns `true` only the first time.
    pub fn mark_visited(&mut self, id: LocationId) -> bool {
        match self.locations.iter_mut().find(|l| l.id == id) {
            Some(location) if !location.visited => {
                location.visited = true;
                true
            }
            _ => false,
        }
    }

    /// Every consistency problem found in the content, in document order.
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen = BTreeSet::new();
        for location in &self.locations {
            if !seen.insert(location.id) {
                issues.push(format!("duplicate location id {}", location.id));
            }
            if let Some(story) = &location.story {
                if self.story(story).is_none() {
                    issues.push(format!(
                        "location {} references unknown story `{story}`",
                        location.id
                    ));
                }
            }
            if !location.overview && location.info.is_empty() && !location.is_locked() {
                issues.push(format!("location {} has no info snippets", location.id));
            }
            for child in &location.children {
                if self.location(*child).is_none() {
                    issues.push(format!(
                        "location {} links unknown child {child}",
                        location.id
                    ));
                }
            }
            for (idx, area) in location.highlight_areas.iter().enumerate() {
                if !area.is_within_image() {
                    issues.push(format!(
                        "location {} highlight area {idx} leaves the image",
                        location.id
                    ));
                }
            }
        }
        let mut story_ids = BTreeSet::new();
        for story in &self.stories {
            if !story_ids.insert(story.id.clone()) {
                issues.push(format!("duplicate story id `{}`", story.id));
            }
            if story.slides.is_empty() {
                issues.push(format!("story `{}` has no slides", story.id));
            }
        }
        issues
    }

    /// # Errors
    ///
    /// Returns the first consistency problem reported by [`Self::issues`].
    pub fn validate(&self) -> Result<(), TourError> {
        match self.issues().into_iter().next() {
            Some(issue) => Err(TourError::InvalidContent(issue)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn slide(title: &str, image: &str) -> Slide {
        Slide {
            title: title.to_string(),
            description: format!("{title} description"),
            image: image.to_string(),
            zoom: None,
            height: None,
        }
    }

    pub fn location(id: LocationId, info: &[&str]) -> Location {
        Location {
            id,
            name: format!("Location {id}"),
            description: String::new(),
            coord: Coordinate {
                lat: 51.718 + f64::from(id) * 0.001,
                lng: 8.754,
            },
            category: Category::Building,
            image: format!("location-{id}.jpg"),
            info: info.iter().map(|s| (*s).to_string()).collect(),
            highlight_areas: Vec::new(),
            maps_url: None,
            story: None,
            overview: false,
            children: Vec::new(),
            visited: false,
        }
    }

    /// Locations 0..=6 (5 and 6 locked), location 1 telling story `door`.
    pub fn store() -> ContentStore {
        let mut locations: Vec<Location> = (0..=6).map(|id| location(id, &["a", "b"])).collect();
        locations[1].story = Some(StoryId::new("door"));
        let story = Story {
            id: StoryId::new("door"),
            title: String::from("Door"),
            slides: vec![
                slide("S0", "door.jpg"),
                slide("S1", "door.jpg"),
                slide("S2", "stairs.jpg"),
            ],
        };
        ContentStore::new(locations, vec![story])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn bundled_content_parses_and_is_consistent() {
        let store = ContentStore::load_from_static();
        assert!(!store.is_empty());
        assert!(store.stories().len() >= 3);
        assert_eq!(store.issues(), Vec::<String>::new());
        let ids: Vec<_> = store.locations().iter().map(|l| l.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn locked_threshold_applies_to_ids() {
        let store = store();
        assert!(!store.location(4).unwrap().is_locked());
        assert!(store.location(5).unwrap().is_locked());
    }

    #[test]
    fn story_lookup_uses_location_reference() {
        let store = store();
        assert_eq!(store.story_for_location(1).unwrap().id.as_str(), "door");
        assert!(matches!(
            store.story_for_location(2),
            Err(TourError::NoStory(2))
        ));
        assert!(matches!(
            store.story_for_location(99),
            Err(TourError::UnknownLocation(99))
        ));
    }

    #[test]
    fn mark_visited_reports_first_time_only() {
        let mut store = store();
        assert!(store.mark_visited(2));
        assert!(!store.mark_visited(2));
        assert!(store.location(2).unwrap().visited);
        assert!(!store.mark_visited(42));
    }

    #[test]
    fn issues_flag_dangling_references() {
        let mut locations = vec![location(0, &["x"]), location(0, &["y"])];
        locations[1].story = Some(StoryId::new("missing"));
        locations[1].children = vec![7];
        let store = ContentStore::new(
            locations,
            vec![Story {
                id: StoryId::new("empty"),
                title: String::new(),
                slides: Vec::new(),
            }],
        );
        let issues = store.issues();
        assert!(issues.iter().any(|i| i.contains("duplicate location id 0")));
        assert!(issues.iter().any(|i| i.contains("unknown story `missing`")));
        assert!(issues.iter().any(|i| i.contains("unknown child 7")));
        assert!(issues.iter().any(|i| i.contains("story `empty` has no slides")));
        assert!(matches!(
            store.validate(),
            Err(TourError::InvalidContent(_))
        ));
    }

    #[test]
    fn zoom_defaults_and_css() {
        let zoom: Zoom = serde_json::from_str(r#"{"scale": 4, "x": 37, "y": -6}"#).unwrap();
        assert_eq!(zoom.css_transform(), "scale(4) translate(37%, -6%)");
        let bare: Zoom = serde_json::from_str("{}").unwrap();
        assert_eq!(bare, Zoom::IDENTITY);
    }
}
