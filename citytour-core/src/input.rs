//! Keyboard and touch input, mapped to tour commands.

use crate::constants::SWIPE_THRESHOLD_PX;

/// Which part of the tour currently owns the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Story,
    Detail,
    Browse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    StoryNext,
    StoryPrevious,
    InfoNext,
    InfoPrevious,
    CarouselNext,
    CarouselPrevious,
    BackToMap,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value. Unhandled keys yield `None`.
    #[must_use]
    pub fn from_key(key: &str, context: KeyContext) -> Option<Self> {
        match (key, context) {
            ("ArrowLeft", KeyContext::Story) => Some(Self::StoryPrevious),
            ("ArrowRight", KeyContext::Story) => Some(Self::StoryNext),
            ("ArrowLeft", KeyContext::Detail) => Some(Self::InfoPrevious),
            ("ArrowRight", KeyContext::Detail) => Some(Self::InfoNext),
            ("ArrowLeft", KeyContext::Browse) => Some(Self::CarouselPrevious),
            ("ArrowRight", KeyContext::Browse) => Some(Self::CarouselNext),
            ("Escape", KeyContext::Story | KeyContext::Detail) => Some(Self::BackToMap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
}

/// A swipe is a mostly horizontal move of more than the threshold.
#[must_use]
pub fn classify_swipe(start: TouchPoint, end: TouchPoint) -> Option<Swipe> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() <= dy.abs() {
        return None;
    }
    if dx < -SWIPE_THRESHOLD_PX {
        Some(Swipe::Left)
    } else if dx > SWIPE_THRESHOLD_PX {
        Some(Swipe::Right)
    } else {
        None
    }
}
