//! Headless tour driver.
//!
//! Plays the role of the browser shell: it owns a [`TourSession`], answers
//! the story player's timer steps from a simulated clock and decides image
//! preloads through an [`AssetOracle`], so walkthroughs run deterministically
//! and without a DOM.

use std::collections::BTreeSet;

use citytour_core::constants::{
    CROSSFADE_MS, SETTLE_DELAY_MS, STORY_EXIT_MS, TRANSITION_LOCK_MS,
};
use citytour_core::{
    AdvanceOutcome, ContentStore, DetailStep, Direction, LifecycleStep, LocationId, PlayerHandle,
    Section, SettleAction, StoryBack, TourSession,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("no story is running")]
    NoStory,
    #[error("transition did not start: {0:?}")]
    NotStarted(AdvanceOutcome),
    #[error("ticket went stale during {0}")]
    Stale(&'static str),
    #[error("location {0} did not open")]
    NotOpened(LocationId),
    #[error("location {0} offers no story")]
    NoHandoff(LocationId),
    #[error("story hand-off for location {0} was dropped")]
    HandoffDropped(LocationId),
    #[error("paging location {0} stalled")]
    Stalled(LocationId),
}

/// Millisecond clock that only moves when the driver sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now_ms: u64,
}

impl SimClock {
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn sleep(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }
}

/// Decides which images load. Everything loads unless blocked.
#[derive(Debug, Clone, Default)]
pub struct AssetOracle {
    unreachable: BTreeSet<String>,
    requests: Vec<String>,
}

impl AssetOracle {
    pub fn block(&mut self, image: &str) {
        self.unreachable.insert(image.to_string());
    }

    pub fn restore(&mut self, image: &str) {
        self.unreachable.remove(image);
    }

    /// Record a preload request and report whether it succeeded.
    pub fn load(&mut self, image: &str) -> bool {
        self.requests.push(image.to_string());
        !self.unreachable.contains(image)
    }

    #[must_use]
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

/// How a driven transition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEnd {
    Completed { index: usize },
    AssetFailed { image: String },
}

#[derive(Debug)]
pub struct TourDriver {
    session: TourSession,
    clock: SimClock,
    oracle: AssetOracle,
    trace: Vec<String>,
}

impl TourDriver {
    #[must_use]
    pub fn new(content: ContentStore) -> Self {
        Self {
            session: TourSession::new(content),
            clock: SimClock::default(),
            oracle: AssetOracle::default(),
            trace: Vec::new(),
        }
    }

    /// Driver over the content shipped with the web front end.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(ContentStore::load_from_static())
    }

    #[must_use]
    pub const fn session(&self) -> &TourSession {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut TourSession {
        &mut self.session
    }

    #[must_use]
    pub const fn clock(&self) -> SimClock {
        self.clock
    }

    #[must_use]
    pub const fn oracle(&self) -> &AssetOracle {
        &self.oracle
    }

    pub const fn oracle_mut(&mut self) -> &mut AssetOracle {
        &mut self.oracle
    }

    #[must_use]
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    fn note(&mut self, message: String) {
        log::debug!("[{:>6} ms] {message}", self.clock.now_ms());
        self.trace.push(format!("{} {message}", self.clock.now_ms()));
    }

    pub fn show_section(&mut self, section: Section) -> Vec<LifecycleStep> {
        let steps = self.session.show_section(section);
        self.note(format!("show {section}: {steps:?}"));
        steps
    }

    /// # Errors
    ///
    /// Fails when the location is unknown or locked.
    pub fn open(&mut self, id: LocationId) -> Result<(), WalkError> {
        let steps = self.session.open_location(id).ok_or(WalkError::NotOpened(id))?;
        self.note(format!("open location {id}: {steps:?}"));
        Ok(())
    }

    /// Open a location and page through every snippet. Returns whether the
    /// location was newly marked visited.
    ///
    /// # Errors
    ///
    /// Fails when the location does not open or paging stops moving.
    pub fn read_to_end(&mut self, id: LocationId) -> Result<bool, WalkError> {
        self.open(id)?;
        loop {
            match self.session.next_info() {
                DetailStep::Advanced { index, .. } => self.note(format!("snippet {index}")),
                DetailStep::Completed { newly_visited } => {
                    self.note(format!("location {id} completed (new: {newly_visited})"));
                    return Ok(newly_visited);
                }
                DetailStep::Unchanged => return Err(WalkError::Stalled(id)),
            }
        }
    }

    /// Open a location and continue into its story after the hand-off delay.
    ///
    /// # Errors
    ///
    /// Fails when the location does not open, has no story, or the hand-off
    /// is dropped.
    pub fn start_story(&mut self, id: LocationId) -> Result<PlayerHandle, WalkError> {
        self.open(id)?;
        let handoff = self
            .session
            .continue_to_story()
            .ok_or(WalkError::NoHandoff(id))?;
        self.clock.sleep(handoff.delay_ms);
        let handle = self
            .session
            .begin_story(&handoff)
            .ok_or(WalkError::HandoffDropped(id))?;
        self.note(format!("story `{}` started", handoff.story));
        Ok(handle)
    }

    pub fn advance(&mut self, direction: Direction) -> AdvanceOutcome {
        let outcome = self.session.advance_story(direction);
        self.note(format!("advance {direction:?}: {outcome:?}"));
        outcome
    }

    /// Run a started transition through settle, preload and finish.
    ///
    /// # Errors
    ///
    /// Fails when `outcome` did not start a transition or a ticket went
    /// stale underway.
    pub fn complete(&mut self, outcome: AdvanceOutcome) -> Result<TransitionEnd, WalkError> {
        let AdvanceOutcome::Started(pending) = outcome else {
            return Err(WalkError::NotStarted(outcome));
        };
        let handle = self.session.stage().handle().ok_or(WalkError::NoStory)?;
        self.clock.sleep(SETTLE_DELAY_MS);
        let action = self
            .session
            .stage_mut()
            .settle(handle, pending.ticket)
            .ok_or(WalkError::Stale("settle"))?;
        match action {
            SettleAction::Transform { .. } => self.clock.sleep(TRANSITION_LOCK_MS),
            SettleAction::Preload { image } => {
                if !self.oracle.load(&image) {
                    let err = self
                        .session
                        .stage_mut()
                        .image_failed(handle, pending.ticket)
                        .ok_or(WalkError::Stale("preload"))?;
                    self.note(format!("preload failed: {err}"));
                    return Ok(TransitionEnd::AssetFailed { image });
                }
                if !self.session.stage_mut().image_loaded(handle, pending.ticket) {
                    return Err(WalkError::Stale("preload"));
                }
                self.clock.sleep(CROSSFADE_MS);
            }
        }
        if !self.session.stage_mut().finish(handle, pending.ticket) {
            return Err(WalkError::Stale("finish"));
        }
        self.note(format!("slide {} shown", pending.to));
        Ok(TransitionEnd::Completed { index: pending.to })
    }

    /// Advance and drive the transition to its end.
    ///
    /// # Errors
    ///
    /// See [`Self::complete`].
    pub fn step_story(&mut self, direction: Direction) -> Result<TransitionEnd, WalkError> {
        let outcome = self.advance(direction);
        self.complete(outcome)
    }

    /// Play the running story forward until its last slide.
    ///
    /// # Errors
    ///
    /// Fails on the first transition that does not complete.
    pub fn play_to_end(&mut self) -> Result<usize, WalkError> {
        loop {
            let player = self.session.stage().player().ok_or(WalkError::NoStory)?;
            if player.is_at_last_slide() {
                return Ok(player.frame().index);
            }
            match self.step_story(Direction::Next)? {
                TransitionEnd::Completed { .. } => {}
                TransitionEnd::AssetFailed { .. } => {
                    return Err(WalkError::Stale("play_to_end"));
                }
            }
        }
    }

    pub fn story_back(&mut self) -> StoryBack {
        let back = self.session.story_back();
        if matches!(back, StoryBack::Exited(_)) {
            self.clock.sleep(STORY_EXIT_MS);
        }
        self.note(format!("story back: {back:?}"));
        back
    }

    /// # Errors
    ///
    /// Fails when no story is running.
    pub fn exit_story_to_map(&mut self) -> Result<Vec<LifecycleStep>, WalkError> {
        let steps = self.session.exit_story_to_map().ok_or(WalkError::NoStory)?;
        self.clock.sleep(STORY_EXIT_MS);
        self.note(format!("story exited to map: {steps:?}"));
        Ok(steps)
    }
}
