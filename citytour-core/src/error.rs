use crate::content::{LocationId, StoryId};
use thiserror::Error;

/// Failures surfaced by the tour core.
///
/// Navigation never returns these to its caller; they describe why an
/// operation resolved to an unchanged state and end up in the log.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("story `{0}` has no slides")]
    EmptyStory(StoryId),
    #[error("unknown location {0}")]
    UnknownLocation(LocationId),
    #[error("location {0} is not unlocked yet")]
    LocationLocked(LocationId),
    #[error("unknown story `{0}`")]
    UnknownStory(StoryId),
    #[error("location {0} has no story")]
    NoStory(LocationId),
    #[error("unknown section `{0}`")]
    UnknownSection(String),
    #[error("no location detail page is open")]
    NoDetailPage,
    #[error("a transition is already in flight")]
    TransitionInFlight,
    #[error("missing render target `{0}`")]
    MissingTarget(String),
    #[error("failed to load image `{image}`")]
    AssetLoad { image: String },
    #[error("content parse error: {0}")]
    Content(#[from] serde_json::Error),
    #[error("invalid content: {0}")]
    InvalidContent(String),
}
