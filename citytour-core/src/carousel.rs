//! Carousel index, map markers and camera focus kept in agreement.
//!
//! The adapter decides; the web crate renders. Nothing here calls into the
//! map library: every camera move is returned as a [`FlyTo`], every marker
//! change as a [`MarkerDiff`].

use std::collections::BTreeSet;

use crate::constants::{
    CARD_WIDTH_PX, CAROUSEL_CENTER_DIVISOR, FLY_TO_DURATION_S, FLY_TO_EASE_LINEARITY,
    FLY_TO_OFFSET, FLY_TO_ZOOM,
};
use crate::content::{ContentStore, Coordinate, Location, LocationId};
use crate::story::Direction;

/// Geographic viewport, as reported by the map after a camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.south..=self.north).contains(&coord.lat)
            && (self.west..=self.east).contains(&coord.lng)
    }
}

/// Camera animation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub center: Coordinate,
    pub zoom: f64,
    pub duration: f64,
    pub ease_linearity: f64,
    pub offset: (f64, f64),
}

impl FlyTo {
    #[must_use]
    pub const fn to(center: Coordinate) -> Self {
        Self {
            center,
            zoom: FLY_TO_ZOOM,
            duration: FLY_TO_DURATION_S,
            ease_linearity: FLY_TO_EASE_LINEARITY,
            offset: FLY_TO_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerStyle {
    pub highlighted: bool,
    pub visited: bool,
    pub disabled: bool,
}

impl MarkerStyle {
    #[must_use]
    pub fn class_name(self) -> String {
        let mut class = String::from("location-marker");
        if self.highlighted {
            class.push_str(" highlighted");
        }
        if self.visited {
            class.push_str(" visited");
        }
        if self.disabled {
            class.push_str(" disabled");
        }
        class
    }
}

/// Result of clicking a marker or a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerClick {
    /// The location was already focused: open its detail page.
    OpenDetail(LocationId),
    /// Focus moved to the location; show its popup and fly there.
    Focus { id: LocationId, fly_to: FlyTo },
    /// Locked or unknown locations take no input.
    Ignored,
}

/// Markers to materialize and to discard after a viewport change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    pub added: Vec<LocationId>,
    pub removed: Vec<LocationId>,
}

impl MarkerDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Card {
    id: LocationId,
    coord: Coordinate,
    enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CarouselAdapter {
    cards: Vec<Card>,
    current: usize,
    hovered: Option<LocationId>,
    rendered: BTreeSet<LocationId>,
}

impl CarouselAdapter {
    #[must_use]
    pub fn new(content: &ContentStore) -> Self {
        let cards = content
            .locations()
            .iter()
            .map(|location| Card {
                id: location.id,
                coord: location.coord,
                enabled: !location.is_locked(),
            })
            .collect();
        let mut adapter = Self {
            cards,
            ..Self::default()
        };
        adapter.current = adapter.first_enabled().unwrap_or(0);
        adapter
    }

    fn first_enabled(&self) -> Option<usize> {
        self.cards.iter().position(|card| card.enabled)
    }

    fn index_of(&self, id: LocationId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_location(&self) -> Option<LocationId> {
        self.cards
            .get(self.current)
            .filter(|card| card.enabled)
            .map(|card| card.id)
    }

    #[must_use]
    pub fn is_focused(&self, id: LocationId) -> bool {
        self.current_location() == Some(id)
    }

    /// Marker highlight: the focused card, or the one under the pointer.
    #[must_use]
    pub fn is_highlighted(&self, id: LocationId) -> bool {
        self.is_focused(id) || self.hovered == Some(id)
    }

    /// Focus the card at `index`, wrapping past either end. Disabled cards
    /// are never focused; the request is then ignored.
    pub fn set_current_index(&mut self, index: usize) -> Option<FlyTo> {
        if self.cards.is_empty() {
            return None;
        }
        let index = index % self.cards.len();
        let card = self.cards[index];
        if !card.enabled {
            return None;
        }
        self.current = index;
        Some(FlyTo::to(card.coord))
    }

    /// Step to the neighbouring enabled card, wrapping at both ends.
    pub fn step(&mut self, direction: Direction) -> Option<FlyTo> {
        let len = self.cards.len();
        let target = (1..=len)
            .map(|offset| match direction {
                Direction::Next => (self.current + offset) % len,
                Direction::Previous => (self.current + len - offset % len) % len,
            })
            .find(|index| self.cards[*index].enabled)?;
        self.set_current_index(target)
    }

    pub fn next(&mut self) -> Option<FlyTo> {
        self.step(Direction::Next)
    }

    pub fn previous(&mut self) -> Option<FlyTo> {
        self.step(Direction::Previous)
    }

    pub fn focus_location(&mut self, id: LocationId) -> Option<FlyTo> {
        let index = self.index_of(id)?;
        self.set_current_index(index)
    }

    /// Focused marker opens the detail page, any other enabled one takes
    /// focus.
    pub fn marker_clicked(&mut self, id: LocationId) -> MarkerClick {
        if self.is_focused(id) {
            return MarkerClick::OpenDetail(id);
        }
        match self.focus_location(id) {
            Some(fly_to) => {
                self.hovered = None;
                MarkerClick::Focus { id, fly_to }
            }
            None => MarkerClick::Ignored,
        }
    }

    /// Cards follow the same focus-then-open rule as markers.
    pub fn card_clicked(&mut self, id: LocationId) -> MarkerClick {
        self.marker_clicked(id)
    }

    /// Pointer entered a marker or card. Returns whether highlighting
    /// changed.
    pub fn hover_start(&mut self, id: LocationId) -> bool {
        let enabled = self
            .index_of(id)
            .is_some_and(|index| self.cards[index].enabled);
        if !enabled || self.is_focused(id) || self.hovered == Some(id) {
            return false;
        }
        self.hovered = Some(id);
        true
    }

    /// Pointer left. The focused card keeps its highlight.
    pub fn hover_end(&mut self, id: LocationId) -> bool {
        if self.hovered != Some(id) {
            return false;
        }
        self.hovered = None;
        true
    }

    #[must_use]
    pub fn marker_style(&self, location: &Location) -> MarkerStyle {
        let disabled = location.is_locked();
        MarkerStyle {
            highlighted: !disabled && self.is_highlighted(location.id),
            visited: location.visited,
            disabled,
        }
    }

    /// Materialize markers inside `bounds`, discard the ones that left it.
    pub fn reconcile_markers(&mut self, bounds: Bounds, content: &ContentStore) -> MarkerDiff {
        let visible: BTreeSet<LocationId> = content
            .locations()
            .iter()
            .filter(|location| bounds.contains(location.coord))
            .map(|location| location.id)
            .collect();
        let diff = MarkerDiff {
            added: visible.difference(&self.rendered).copied().collect(),
            removed: self.rendered.difference(&visible).copied().collect(),
        };
        self.rendered = visible;
        diff
    }

    #[must_use]
    pub fn is_rendered(&self, id: LocationId) -> bool {
        self.rendered.contains(&id)
    }

    #[must_use]
    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    /// The map went away; its markers went with it.
    pub fn clear_markers(&mut self) {
        self.rendered.clear();
        self.hovered = None;
    }

    /// Horizontal track offset in pixels that brings the focused card into
    /// view.
    #[must_use]
    pub fn scroll_offset(&self, container_width: f64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let index = self.current as f64;
        index * CARD_WIDTH_PX - (container_width - CARD_WIDTH_PX) / CAROUSEL_CENTER_DIVISOR
    }

    pub fn reset(&mut self) {
        self.current = self.first_enabled().unwrap_or(0);
        self.clear_markers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;

    const LAST_ENABLED: LocationId = 4;

    #[test]
    fn wraps_between_first_and_last_enabled() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        assert_eq!(carousel.current_location(), Some(0));
        carousel.previous().unwrap();
        assert_eq!(carousel.current_location(), Some(LAST_ENABLED));
        carousel.next().unwrap();
        assert_eq!(carousel.current_location(), Some(0));
    }

    #[test]
    fn next_walks_enabled_cards_in_id_order() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        let visited: Vec<_> = (0..5)
            .filter_map(|_| {
                carousel.next();
                carousel.current_location()
            })
            .collect();
        assert_eq!(visited, vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn locked_cards_never_take_focus() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        carousel.focus_location(2).unwrap();
        assert!(carousel.focus_location(5).is_none());
        assert!(carousel.set_current_index(6).is_none());
        assert_eq!(carousel.marker_clicked(6), MarkerClick::Ignored);
        assert!(!carousel.hover_start(5));
        assert_eq!(carousel.current_location(), Some(2));
    }

    #[test]
    fn click_focuses_then_opens() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        let coord = content.location(3).unwrap().coord;
        assert_eq!(
            carousel.marker_clicked(3),
            MarkerClick::Focus {
                id: 3,
                fly_to: FlyTo::to(coord)
            }
        );
        assert_eq!(carousel.card_clicked(3), MarkerClick::OpenDetail(3));
    }

    #[test]
    fn hover_highlights_until_pointer_leaves() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        assert!(carousel.hover_start(2));
        assert!(carousel.is_highlighted(2));
        assert!(carousel.hover_end(2));
        assert!(!carousel.is_highlighted(2));
        assert!(!carousel.hover_start(0));
        assert!(!carousel.hover_end(0));
        assert!(carousel.is_highlighted(0));
    }

    #[test]
    fn marker_classes_reflect_state() {
        let mut content = fixtures::store();
        content.mark_visited(0);
        let carousel = CarouselAdapter::new(&content);
        let focused = carousel.marker_style(content.location(0).unwrap());
        assert_eq!(focused.class_name(), "location-marker highlighted visited");
        let locked = carousel.marker_style(content.location(5).unwrap());
        assert_eq!(locked.class_name(), "location-marker disabled");
    }

    #[test]
    fn markers_leaving_the_viewport_are_discarded() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        let wide = Bounds {
            south: 51.0,
            west: 8.0,
            north: 52.0,
            east: 9.0,
        };
        let diff = carousel.reconcile_markers(wide, &content);
        assert_eq!(diff.added.len(), content.locations().len());
        assert!(diff.removed.is_empty());

        let narrow = Bounds {
            south: 51.7175,
            west: 8.75,
            north: 51.7195,
            east: 8.76,
        };
        let diff = carousel.reconcile_markers(narrow, &content);
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, vec![2, 3, 4, 5, 6]);
        assert!(carousel.is_rendered(1));
        assert!(!carousel.is_rendered(4));
        assert!(carousel.reconcile_markers(narrow, &content).is_empty());
    }

    #[test]
    fn scroll_offset_centres_focused_card() {
        let content = fixtures::store();
        let mut carousel = CarouselAdapter::new(&content);
        assert!((carousel.scroll_offset(236.0)).abs() < f64::EPSILON);
        carousel.focus_location(2).unwrap();
        let expected = 2.0 * 236.0 - (936.0 - 236.0) / 1.75;
        assert!((carousel.scroll_offset(936.0) - expected).abs() < 1e-9);
    }
}
