//! Story player: a linear slideshow with serialized transitions.
//!
//! A transition runs in steps driven by the caller's timers:
//! [`StoryPlayer::advance`] fades the text out, [`StoryPlayer::settle`] swaps
//! state after the settle delay and picks a render strategy, the preload
//! callbacks resolve cross-fades, and [`StoryPlayer::finish`] releases the
//! lock once the visual transition is over. Each step carries the
//! [`TransitionTicket`] issued by `advance`; steps with an outdated ticket are
//! ignored.

use crate::content::{Slide, Story, StoryId, Zoom};
use crate::error::TourError;
use crate::transition::{TransitionLock, TransitionTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// How a slide change is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Same image: animate zoom/offset on the existing image element.
    InPlace,
    /// Different image: preload it, then cross-fade the slides.
    CrossFade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    FadingOut,
    Transforming,
    Preloading,
    CrossFading,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    ticket: TransitionTicket,
    from: usize,
    to: usize,
    strategy: RenderStrategy,
    step: Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    ShowingSlide(usize),
    Transitioning { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub ticket: TransitionTicket,
    pub from: usize,
    pub to: usize,
    pub strategy: RenderStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Started(PendingTransition),
    /// A transition is in flight; the request is dropped, not queued.
    Busy,
    /// The target index is outside the story; boundaries do not wrap.
    AtBoundary,
    /// The request came from a player that has since been disposed.
    Stale,
}

/// What the renderer does once the settle delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub enum SettleAction {
    Transform { zoom: Zoom, height_pct: f64 },
    Preload { image: String },
}

/// Snapshot of what should be on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryFrame {
    pub index: usize,
    /// Slide fading out underneath `index` during a cross-fade.
    pub outgoing: Option<usize>,
    pub text_visible: bool,
    pub progress: f64,
    pub at_first: bool,
    pub at_last: bool,
}

#[derive(Debug, Clone)]
pub struct StoryPlayer {
    story_id: StoryId,
    slides: Vec<Slide>,
    index: usize,
    lock: TransitionLock,
    transition: Option<Transition>,
}

impl StoryPlayer {
    /// Player positioned on the first slide.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::EmptyStory`] when the story has no slides.
    pub fn new(story: &Story) -> Result<Self, TourError> {
        if story.slides.is_empty() {
            return Err(TourError::EmptyStory(story.id.clone()));
        }
        Ok(Self {
            story_id: story.id.clone(),
            slides: story.slides.clone(),
            index: 0,
            lock: TransitionLock::new(),
            transition: None,
        })
    }

    #[must_use]
    pub const fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.index]
    }

    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.lock.is_in_flight()
    }

    #[must_use]
    pub const fn is_at_first_slide(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_at_last_slide(&self) -> bool {
        self.index + 1 == self.slides.len()
    }

    /// `index / (len - 1) * 100`, or 0 for single-slide stories.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.slides.len() <= 1 {
            return 0.0;
        }
        let last = self.slides.len() - 1;
        #[allow(clippy::cast_precision_loss)]
        let pct = self.index as f64 / last as f64 * 100.0;
        pct
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        match self.transition {
            Some(t) => PlayerState::Transitioning {
                from: t.from,
                to: t.to,
            },
            None => PlayerState::ShowingSlide(self.index),
        }
    }

    #[must_use]
    pub fn frame(&self) -> StoryFrame {
        let (outgoing, text_visible) = match self.transition.map(|t| (t.step, t.from)) {
            Some((Step::FadingOut | Step::Preloading, _)) => (None, false),
            Some((Step::CrossFading, from)) => (Some(from), true),
            Some((Step::Transforming, _)) | None => (None, true),
        };
        StoryFrame {
            index: self.index,
            outgoing,
            text_visible,
            progress: self.progress(),
            at_first: self.is_at_first_slide(),
            at_last: self.is_at_last_slide(),
        }
    }

    /// Start moving one slide in `direction`.
    pub fn advance(&mut self, direction: Direction) -> AdvanceOutcome {
        if self.lock.is_in_flight() {
            return AdvanceOutcome::Busy;
        }
        let Some(to) = self
            .index
            .checked_add_signed(direction.delta())
            .filter(|to| *to < self.slides.len())
        else {
            return AdvanceOutcome::AtBoundary;
        };
        let Some(ticket) = self.lock.try_acquire() else {
            return AdvanceOutcome::Busy;
        };
        let from = self.index;
        let strategy = if self.slides[from].shares_image_with(&self.slides[to]) {
            RenderStrategy::InPlace
        } else {
            RenderStrategy::CrossFade
        };
        self.transition = Some(Transition {
            ticket,
            from,
            to,
            strategy,
            step: Step::FadingOut,
        });
        AdvanceOutcome::Started(PendingTransition {
            ticket,
            from,
            to,
            strategy,
        })
    }

    fn current_transition(&self, ticket: TransitionTicket, step: Step) -> Option<Transition> {
        self.transition
            .filter(|t| t.ticket == ticket && t.step == step && self.lock.is_current(ticket))
    }

    fn set_step(&mut self, step: Step) {
        if let Some(t) = self.transition.as_mut() {
            t.step = step;
        }
    }

    /// The settle delay elapsed. In-place transitions swap state now;
    /// cross-fades ask for the next image to be preloaded.
    pub fn settle(&mut self, ticket: TransitionTicket) -> Option<SettleAction> {
        let t = self.current_transition(ticket, Step::FadingOut)?;
        match t.strategy {
            RenderStrategy::InPlace => {
                self.index = t.to;
                self.set_step(Step::Transforming);
                let slide = &self.slides[t.to];
                Some(SettleAction::Transform {
                    zoom: slide.zoom_or_identity(),
                    height_pct: slide.height_pct(),
                })
            }
            RenderStrategy::CrossFade => {
                self.set_step(Step::Preloading);
                Some(SettleAction::Preload {
                    image: self.slides[t.to].image.clone(),
                })
            }
        }
    }

    /// The preloaded image arrived: swap state and start the cross-fade.
    pub fn image_loaded(&mut self, ticket: TransitionTicket) -> bool {
        let Some(t) = self.current_transition(ticket, Step::Preloading) else {
            return false;
        };
        self.index = t.to;
        self.set_step(Step::CrossFading);
        true
    }

    /// The preload failed: keep the current slide and release the lock so
    /// the same navigation can be retried. Returns the error to log, or
    /// `None` when the ticket is stale.
    pub fn image_failed(&mut self, ticket: TransitionTicket) -> Option<TourError> {
        let t = self.current_transition(ticket, Step::Preloading)?;
        self.transition = None;
        self.lock.release(ticket);
        Some(TourError::AssetLoad {
            image: self.slides[t.to].image.clone(),
        })
    }

    /// The visual transition is over: release the lock.
    pub fn finish(&mut self, ticket: TransitionTicket) -> bool {
        let finished = self
            .current_transition(ticket, Step::Transforming)
            .or_else(|| self.current_transition(ticket, Step::CrossFading))
            .is_some();
        if finished {
            self.transition = None;
            self.lock.release(ticket);
        }
        finished
    }
}

/// Identity of one started player. Handles of disposed players go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerHandle {
    serial: u64,
}

/// Where control goes after a player is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryExit {
    BackToDetail,
    ToMap,
}

/// Owner of the single live story player.
#[derive(Debug, Default)]
pub struct StoryStage {
    active: Option<(PlayerHandle, StoryPlayer)>,
    serial: u64,
    disposed: u64,
}

impl StoryStage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the running player (if any) and start `story` at slide 0.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::EmptyStory`] without touching the running
    /// player when `story` has no slides.
    pub fn start(&mut self, story: &Story) -> Result<PlayerHandle, TourError> {
        let player = StoryPlayer::new(story)?;
        self.dispose();
        self.serial += 1;
        let handle = PlayerHandle {
            serial: self.serial,
        };
        log::debug!("story `{}` started", story.id);
        self.active = Some((handle, player));
        Ok(handle)
    }

    /// Tear down the running player. Safe to call with none running.
    pub fn dispose(&mut self) -> bool {
        match self.active.take() {
            Some((_, player)) => {
                self.disposed += 1;
                log::debug!("story `{}` disposed", player.story_id());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub const fn disposed_count(&self) -> u64 {
        self.disposed
    }

    #[must_use]
    pub fn handle(&self) -> Option<PlayerHandle> {
        self.active.as_ref().map(|(h, _)| *h)
    }

    #[must_use]
    pub fn is_live(&self, handle: PlayerHandle) -> bool {
        self.handle() == Some(handle)
    }

    #[must_use]
    pub fn player(&self) -> Option<&StoryPlayer> {
        self.active.as_ref().map(|(_, p)| p)
    }

    #[must_use]
    pub fn player_for(&self, handle: PlayerHandle) -> Option<&StoryPlayer> {
        self.active
            .as_ref()
            .filter(|(h, _)| *h == handle)
            .map(|(_, p)| p)
    }

    fn player_mut(&mut self, handle: PlayerHandle) -> Option<&mut StoryPlayer> {
        self.active
            .as_mut()
            .filter(|(h, _)| *h == handle)
            .map(|(_, p)| p)
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.player().map_or(PlayerState::Idle, StoryPlayer::state)
    }

    pub fn advance(&mut self, handle: PlayerHandle, direction: Direction) -> AdvanceOutcome {
        self.player_mut(handle)
            .map_or(AdvanceOutcome::Stale, |p| p.advance(direction))
    }

    pub fn settle(
        &mut self,
        handle: PlayerHandle,
        ticket: TransitionTicket,
    ) -> Option<SettleAction> {
        self.player_mut(handle)?.settle(ticket)
    }

    pub fn image_loaded(&mut self, handle: PlayerHandle, ticket: TransitionTicket) -> bool {
        self.player_mut(handle)
            .is_some_and(|p| p.image_loaded(ticket))
    }

    pub fn image_failed(
        &mut self,
        handle: PlayerHandle,
        ticket: TransitionTicket,
    ) -> Option<TourError> {
        self.player_mut(handle)?.image_failed(ticket)
    }

    pub fn finish(&mut self, handle: PlayerHandle, ticket: TransitionTicket) -> bool {
        self.player_mut(handle).is_some_and(|p| p.finish(ticket))
    }

    /// Leave the story backwards into the detail page. Only accepted on the
    /// first slide with no transition running.
    pub fn exit_to_previous(&mut self, handle: PlayerHandle) -> Option<StoryExit> {
        let player = self.player_for(handle)?;
        if !player.is_at_first_slide() || player.is_transitioning() {
            return None;
        }
        self.dispose();
        Some(StoryExit::BackToDetail)
    }

    /// Leave the story for the map, from any slide.
    pub fn exit_to_map(&mut self, handle: PlayerHandle) -> Option<StoryExit> {
        if !self.is_live(handle) {
            return None;
        }
        self.dispose();
        Some(StoryExit::ToMap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::slide;

    fn story(slides: Vec<Slide>) -> Story {
        Story {
            id: StoryId::new("test"),
            title: String::from("Test"),
            slides,
        }
    }

    fn three_slides() -> Story {
        story(vec![
            slide("S0", "door.jpg"),
            slide("S1", "door.jpg"),
            slide("S2", "stairs.jpg"),
        ])
    }

    fn started(outcome: AdvanceOutcome) -> PendingTransition {
        match outcome {
            AdvanceOutcome::Started(pending) => pending,
            other => panic!("expected a started transition, got {other:?}"),
        }
    }

    /// Drive a transition through to completion with the image available.
    fn complete(player: &mut StoryPlayer, pending: PendingTransition) {
        match player.settle(pending.ticket).expect("fresh ticket settles") {
            SettleAction::Transform { .. } => {}
            SettleAction::Preload { .. } => assert!(player.image_loaded(pending.ticket)),
        }
        assert!(player.finish(pending.ticket));
    }

    #[test]
    fn empty_story_is_rejected() {
        assert!(matches!(
            StoryPlayer::new(&story(Vec::new())),
            Err(TourError::EmptyStory(_))
        ));
    }

    #[test]
    fn walks_three_slides_and_stops_at_the_end() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        assert_eq!(player.current_index(), 0);
        assert!(player.progress().abs() < f64::EPSILON);
        assert!(player.is_at_first_slide());

        let first = started(player.advance(Direction::Next));
        assert_eq!(first.strategy, RenderStrategy::InPlace);
        complete(&mut player, first);
        let second = started(player.advance(Direction::Next));
        assert_eq!(second.strategy, RenderStrategy::CrossFade);
        complete(&mut player, second);

        assert_eq!(player.current_index(), 2);
        assert!((player.progress() - 100.0).abs() < 1e-9);
        assert!(player.is_at_last_slide());
        assert!(player.frame().at_last);
        assert_eq!(player.advance(Direction::Next), AdvanceOutcome::AtBoundary);
        assert_eq!(player.current_index(), 2);
    }

    #[test]
    fn previous_at_first_slide_is_boundary() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        assert_eq!(
            player.advance(Direction::Previous),
            AdvanceOutcome::AtBoundary
        );
        assert!(!player.is_transitioning());
    }

    #[test]
    fn second_advance_while_in_flight_is_dropped() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        let pending = started(player.advance(Direction::Next));
        assert_eq!(player.advance(Direction::Next), AdvanceOutcome::Busy);
        complete(&mut player, pending);
        assert_eq!(player.current_index(), 1);
    }

    #[test]
    fn lock_is_held_until_finish_not_until_swap() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        let pending = started(player.advance(Direction::Next));
        player.settle(pending.ticket).unwrap();
        assert_eq!(player.current_index(), 1);
        assert!(player.is_transitioning());
        assert_eq!(player.advance(Direction::Next), AdvanceOutcome::Busy);
        assert!(player.finish(pending.ticket));
        assert!(!player.is_transitioning());
    }

    #[test]
    fn text_fades_during_settle_and_preload() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        let first = started(player.advance(Direction::Next));
        complete(&mut player, first);
        let pending = started(player.advance(Direction::Next));
        assert!(!player.frame().text_visible);
        assert_eq!(
            player.settle(pending.ticket),
            Some(SettleAction::Preload {
                image: String::from("stairs.jpg")
            })
        );
        assert!(!player.frame().text_visible);
        assert_eq!(player.current_index(), 1);
        assert!(player.image_loaded(pending.ticket));
        let frame = player.frame();
        assert_eq!(frame.index, 2);
        assert_eq!(frame.outgoing, Some(1));
        assert!(frame.text_visible);
    }

    #[test]
    fn failed_preload_keeps_slide_and_allows_retry() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        let first = started(player.advance(Direction::Next));
        complete(&mut player, first);

        let attempt = started(player.advance(Direction::Next));
        player.settle(attempt.ticket).unwrap();
        let err = player.image_failed(attempt.ticket).expect("current ticket");
        assert!(matches!(err, TourError::AssetLoad { ref image } if image == "stairs.jpg"));
        assert_eq!(player.current_index(), 1);
        assert!(!player.is_transitioning());
        assert_eq!(player.state(), PlayerState::ShowingSlide(1));

        let retry = started(player.advance(Direction::Next));
        complete(&mut player, retry);
        assert_eq!(player.current_index(), 2);
    }

    #[test]
    fn stale_ticket_steps_are_ignored() {
        let mut player = StoryPlayer::new(&three_slides()).unwrap();
        let first = started(player.advance(Direction::Next));
        complete(&mut player, first);
        assert!(player.settle(first.ticket).is_none());
        assert!(!player.finish(first.ticket));
        assert!(player.image_failed(first.ticket).is_none());
        assert_eq!(player.current_index(), 1);
    }

    #[test]
    fn single_slide_progress_is_zero() {
        let player = StoryPlayer::new(&story(vec![slide("only", "a.jpg")])).unwrap();
        assert!(player.progress().abs() < f64::EPSILON);
        assert!(player.is_at_first_slide());
        assert!(player.is_at_last_slide());
    }

    #[test]
    fn stage_disposes_previous_player_once() {
        let mut stage = StoryStage::new();
        assert!(!stage.dispose());
        let a = stage.start(&three_slides()).unwrap();
        let b = stage.start(&three_slides()).unwrap();
        assert_ne!(a, b);
        assert_eq!(stage.disposed_count(), 1);
        assert_eq!(stage.advance(a, Direction::Next), AdvanceOutcome::Stale);
        assert!(matches!(
            stage.advance(b, Direction::Next),
            AdvanceOutcome::Started(_)
        ));
        assert_eq!(stage.disposed_count(), 1);
    }

    #[test]
    fn stage_keeps_player_when_new_story_is_empty() {
        let mut stage = StoryStage::new();
        let live = stage.start(&three_slides()).unwrap();
        assert!(stage.start(&story(Vec::new())).is_err());
        assert!(stage.is_live(live));
        assert_eq!(stage.disposed_count(), 0);
    }

    #[test]
    fn late_completion_after_exit_is_dropped() {
        let mut stage = StoryStage::new();
        let handle = stage.start(&three_slides()).unwrap();
        complete_via_stage(&mut stage, handle);
        let AdvanceOutcome::Started(pending) = stage.advance(handle, Direction::Next) else {
            panic!("transition should start");
        };
        assert_eq!(stage.exit_to_map(handle), Some(StoryExit::ToMap));
        assert!(stage.settle(handle, pending.ticket).is_none());
        assert!(!stage.image_loaded(handle, pending.ticket));
        assert_eq!(stage.state(), PlayerState::Idle);
    }

    fn complete_via_stage(stage: &mut StoryStage, handle: PlayerHandle) {
        let AdvanceOutcome::Started(pending) = stage.advance(handle, Direction::Next) else {
            panic!("transition should start");
        };
        stage.settle(handle, pending.ticket).unwrap();
        assert!(stage.finish(handle, pending.ticket));
    }

    #[test]
    fn exit_to_previous_only_from_first_slide() {
        let mut stage = StoryStage::new();
        let handle = stage.start(&three_slides()).unwrap();
        complete_via_stage(&mut stage, handle);
        assert_eq!(stage.exit_to_previous(handle), None);
        assert!(stage.is_live(handle));

        let handle = stage.start(&three_slides()).unwrap();
        assert_eq!(
            stage.exit_to_previous(handle),
            Some(StoryExit::BackToDetail)
        );
        assert!(stage.player().is_none());
        assert_eq!(stage.exit_to_map(handle), None);
    }
}
