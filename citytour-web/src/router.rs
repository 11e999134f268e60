use citytour_core::{LocationId, Section};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/map")]
    Map,
    #[at("/location/:id")]
    Location { id: LocationId },
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Route for the visible section; the detail section needs its location.
    #[must_use]
    pub const fn from_section(section: Section, location: Option<LocationId>) -> Self {
        match (section, location) {
            (Section::Home, _) => Self::Home,
            (Section::Map, _) | (Section::LocationDetail, None) => Self::Map,
            (Section::LocationDetail, Some(id)) => Self::Location { id },
        }
    }

    #[must_use]
    pub const fn section(&self) -> Option<Section> {
        match self {
            Self::Home => Some(Section::Home),
            Self::Map => Some(Section::Map),
            Self::Location { .. } => Some(Section::LocationDetail),
            Self::NotFound => None, // Keep the current section on unknown URLs.
        }
    }

    #[must_use]
    pub const fn location(&self) -> Option<LocationId> {
        match self {
            Self::Location { id } => Some(*id),
            _ => None,
        }
    }
}
