//! Top-level sections and the lifecycle steps of switching between them.

use std::fmt;
use std::str::FromStr;

use crate::error::TourError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    Map,
    LocationDetail,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Home, Self::Map, Self::LocationDetail];

    /// DOM id of the section container.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Map => "map",
            Self::LocationDetail => "location-detail",
        }
    }

    /// The page header is only shown on the home section.
    #[must_use]
    pub const fn shows_header(self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| TourError::UnknownSection(s.to_string()))
    }
}

/// One side effect the renderer performs, in order, during a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStep {
    Hide(Section),
    ResetScroll,
    /// Destroy the live map instance and its listeners.
    TeardownMap,
    /// Build a fresh map instance tagged with `generation`.
    InitMap { generation: u64 },
    InitCarousel,
    Show(Section),
}

/// Tracks the visible section and whether a map instance is alive.
#[derive(Debug, Clone, Default)]
pub struct SectionCoordinator {
    current: Section,
    map_live: bool,
    map_generation: u64,
}

impl SectionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Section {
        self.current
    }

    #[must_use]
    pub const fn is_detail_view(&self) -> bool {
        matches!(self.current, Section::LocationDetail)
    }

    #[must_use]
    pub const fn map_live(&self) -> bool {
        self.map_live
    }

    /// Generation of the most recently created map; older map callbacks
    /// compare against this and bail out.
    #[must_use]
    pub const fn map_generation(&self) -> u64 {
        self.map_generation
    }

    /// Switch to `target` by id.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::UnknownSection`] and leaves the current section
    /// as is when `id` names no section.
    pub fn show_by_id(&mut self, id: &str) -> Result<Vec<LifecycleStep>, TourError> {
        let target = id.parse::<Section>().inspect_err(|err| {
            log::warn!("{err}");
        })?;
        Ok(self.show(target))
    }

    /// Switch to `target`. Entering the map always rebuilds it from scratch,
    /// also when the map is already showing.
    pub fn show(&mut self, target: Section) -> Vec<LifecycleStep> {
        let mut steps: Vec<LifecycleStep> = Section::ALL
            .into_iter()
            .filter(|section| *section != target)
            .map(LifecycleStep::Hide)
            .collect();
        steps.push(LifecycleStep::ResetScroll);

        match target {
            Section::Map => {
                if self.map_live {
                    steps.push(LifecycleStep::TeardownMap);
                }
                self.map_generation += 1;
                self.map_live = true;
                steps.push(LifecycleStep::InitMap {
                    generation: self.map_generation,
                });
                steps.push(LifecycleStep::InitCarousel);
            }
            Section::Home => {
                if self.map_live {
                    steps.push(LifecycleStep::TeardownMap);
                    self.map_live = false;
                }
            }
            Section::LocationDetail => {}
        }

        steps.push(LifecycleStep::Show(target));
        log::debug!("section {} -> {}", self.current, target);
        self.current = target;
        steps
    }
}
