//! Application shell state: every controller of one tour session, wired so
//! that section switches clean up after themselves.

use crate::carousel::{Bounds, CarouselAdapter, MarkerDiff};
use crate::content::{ContentStore, LocationId};
use crate::detail::{DetailController, DetailPage, DetailStep, StoryHandoff};
use crate::input::KeyContext;
use crate::section::{LifecycleStep, Section, SectionCoordinator};
use crate::story::{AdvanceOutcome, Direction, PlayerHandle, StoryExit, StoryStage};

/// Result of a "go back" request inside a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryBack {
    Moved(AdvanceOutcome),
    Exited(StoryExit),
}

#[derive(Debug)]
pub struct TourSession {
    content: ContentStore,
    sections: SectionCoordinator,
    detail: DetailController,
    stage: StoryStage,
    carousel: CarouselAdapter,
}

impl Default for TourSession {
    fn default() -> Self {
        Self::new(ContentStore::load_from_static())
    }
}

impl TourSession {
    #[must_use]
    pub fn new(content: ContentStore) -> Self {
        let carousel = CarouselAdapter::new(&content);
        Self {
            content,
            sections: SectionCoordinator::new(),
            detail: DetailController::new(),
            stage: StoryStage::new(),
            carousel,
        }
    }

    #[must_use]
    pub const fn content(&self) -> &ContentStore {
        &self.content
    }

    #[must_use]
    pub const fn sections(&self) -> &SectionCoordinator {
        &self.sections
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.sections.current()
    }

    #[must_use]
    pub const fn detail(&self) -> &DetailController {
        &self.detail
    }

    #[must_use]
    pub const fn detail_page(&self) -> Option<&DetailPage> {
        self.detail.page()
    }

    #[must_use]
    pub const fn stage(&self) -> &StoryStage {
        &self.stage
    }

    /// Story callbacks (settle, preload, finish) go straight to the stage;
    /// their handle and ticket checks drop late arrivals.
    pub const fn stage_mut(&mut self) -> &mut StoryStage {
        &mut self.stage
    }

    #[must_use]
    pub const fn carousel(&self) -> &CarouselAdapter {
        &self.carousel
    }

    pub const fn carousel_mut(&mut self) -> &mut CarouselAdapter {
        &mut self.carousel
    }

    /// Location of the open detail page.
    #[must_use]
    pub fn current_location(&self) -> Option<LocationId> {
        self.detail.page().map(|page| page.location_id)
    }

    #[must_use]
    pub fn story_active(&self) -> bool {
        self.stage.handle().is_some()
    }

    /// Who receives the arrow keys right now.
    #[must_use]
    pub fn key_context(&self) -> KeyContext {
        if self.story_active() {
            KeyContext::Story
        } else if self.sections.is_detail_view() {
            KeyContext::Detail
        } else {
            KeyContext::Browse
        }
    }

    /// Switch sections. Leaving the detail view drops its page and any
    /// running story; going home also resets the carousel.
    pub fn show_section(&mut self, target: Section) -> Vec<LifecycleStep> {
        if target != Section::LocationDetail {
            self.stage.dispose();
            self.detail.close();
        }
        if target == Section::Home {
            self.carousel.reset();
        }
        let steps = self.sections.show(target);
        if steps.contains(&LifecycleStep::TeardownMap) {
            self.carousel.clear_markers();
        }
        steps
    }

    /// Open a location's detail page. Unknown and locked ids are logged and
    /// change nothing.
    pub fn open_location(&mut self, id: LocationId) -> Option<Vec<LifecycleStep>> {
        if let Err(err) = self.detail.open(&self.content, id) {
            log::warn!("cannot open location: {err}");
            return None;
        }
        self.stage.dispose();
        self.carousel.focus_location(id);
        Some(self.sections.show(Section::LocationDetail))
    }

    pub fn next_info(&mut self) -> DetailStep {
        self.detail.next(&mut self.content)
    }

    pub fn previous_info(&mut self) -> DetailStep {
        self.detail.previous()
    }

    pub fn continue_to_story(&mut self) -> Option<StoryHandoff> {
        self.detail.continue_to_story(&self.content)
    }

    /// Start the story once the hand-off delay elapsed. A hand-off that went
    /// stale meanwhile (page closed or reopened) starts nothing.
    pub fn begin_story(&mut self, handoff: &StoryHandoff) -> Option<PlayerHandle> {
        if !self.detail.complete_handoff(handoff.ticket) {
            log::debug!("dropping stale story hand-off for `{}`", handoff.story);
            return None;
        }
        let Some(story) = self.content.story(&handoff.story) else {
            log::warn!("unknown story `{}`", handoff.story);
            return None;
        };
        match self.stage.start(story) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        }
    }

    pub fn advance_story(&mut self, direction: Direction) -> AdvanceOutcome {
        match self.stage.handle() {
            Some(handle) => self.stage.advance(handle, direction),
            None => AdvanceOutcome::Stale,
        }
    }

    /// Back one slide, or out to the detail page from the first slide.
    pub fn story_back(&mut self) -> StoryBack {
        let Some(handle) = self.stage.handle() else {
            return StoryBack::Moved(AdvanceOutcome::Stale);
        };
        match self.stage.exit_to_previous(handle) {
            Some(exit) => StoryBack::Exited(exit),
            None => StoryBack::Moved(self.stage.advance(handle, Direction::Previous)),
        }
    }

    /// Leave the story (from any slide) for the map.
    pub fn exit_story_to_map(&mut self) -> Option<Vec<LifecycleStep>> {
        let handle = self.stage.handle()?;
        self.stage.exit_to_map(handle)?;
        Some(self.show_section(Section::Map))
    }

    pub fn go_home(&mut self) -> Vec<LifecycleStep> {
        self.show_section(Section::Home)
    }

    /// Viewport changed: work out which markers the map should hold.
    pub fn reconcile_markers(&mut self, bounds: Bounds) -> MarkerDiff {
        self.carousel.reconcile_markers(bounds, &self.content)
    }
}
