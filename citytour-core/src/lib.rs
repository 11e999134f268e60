//! City tour navigation core
//!
//! Platform-agnostic state machines behind the interactive city tour: the
//! story player, the section coordinator, the location detail pager and the
//! carousel/map adapter. Nothing in here touches the DOM; the web crate drives
//! these types and turns their outcomes into rendering and timers.

pub mod carousel;
pub mod constants;
pub mod content;
pub mod detail;
pub mod error;
pub mod highlight;
pub mod input;
pub mod section;
pub mod session;
pub mod story;
pub mod transition;

pub use carousel::{Bounds, CarouselAdapter, FlyTo, MarkerClick, MarkerDiff, MarkerStyle};
pub use content::{
    Category, ContentStore, Coordinate, Location, LocationId, Slide, Story, StoryId, Zoom,
};
pub use detail::{DetailController, DetailPage, DetailStep, StoryHandoff};
pub use error::TourError;
pub use highlight::{HighlightArea, HighlightFrame, Insets, Rect, Translation};
pub use input::{KeyCommand, KeyContext, Swipe, TouchPoint, classify_swipe};
pub use section::{LifecycleStep, Section, SectionCoordinator};
pub use session::{StoryBack, TourSession};
pub use story::{
    AdvanceOutcome, Direction, PendingTransition, PlayerHandle, PlayerState, RenderStrategy,
    SettleAction, StoryExit, StoryFrame, StoryPlayer, StoryStage,
};
pub use transition::{Debounce, TransitionLock, TransitionTicket};
