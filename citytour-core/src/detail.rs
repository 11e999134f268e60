//! Location detail pager: one info snippet at a time, a highlighted image
//! region per snippet, and the hand-off into the location's story.

use crate::constants::STORY_HANDOFF_DELAY_MS;
use crate::content::{ContentStore, LocationId, StoryId};
use crate::error::TourError;
use crate::highlight::{HighlightFrame, highlight_for};
use crate::transition::{TransitionLock, TransitionTicket};

/// Pagination state of the open detail page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailPage {
    pub location_id: LocationId,
    pub snippet_index: usize,
    pub snippet_count: usize,
    pub progress: f64,
    pub completed: bool,
    pub overview: bool,
}

impl DetailPage {
    /// Continue into the story is offered until the page completes.
    #[must_use]
    pub const fn can_continue(&self) -> bool {
        !self.overview && !self.completed
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.snippet_index > 0 || self.completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailStep {
    Advanced { index: usize, progress: f64 },
    /// Every snippet has been read. `newly_visited` is true only the first
    /// time the location flips to visited.
    Completed { newly_visited: bool },
    Unchanged,
}

/// A pending story start, to be confirmed after the exit animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryHandoff {
    pub ticket: TransitionTicket,
    pub story: StoryId,
    pub delay_ms: u32,
}

#[derive(Debug, Default)]
pub struct DetailController {
    page: Option<DetailPage>,
    handoff: TransitionLock,
}

fn progress_for(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = index as f64 * 100.0 / count as f64;
    pct
}

impl DetailController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn page(&self) -> Option<&DetailPage> {
        self.page.as_ref()
    }

    /// Open `id` at snippet 0 with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::UnknownLocation`] or [`TourError::LocationLocked`]
    /// and keeps the currently open page untouched.
    pub fn open(&mut self, content: &ContentStore, id: LocationId) -> Result<DetailPage, TourError> {
        let location = content.location(id).ok_or(TourError::UnknownLocation(id))?;
        if location.is_locked() {
            return Err(TourError::LocationLocked(id));
        }
        self.handoff.invalidate();
        let page = DetailPage {
            location_id: id,
            snippet_index: 0,
            snippet_count: if location.overview {
                0
            } else {
                location.info.len()
            },
            progress: 0.0,
            completed: false,
            overview: location.overview,
        };
        self.page = Some(page);
        Ok(page)
    }

    pub fn close(&mut self) {
        self.handoff.invalidate();
        self.page = None;
    }

    /// Show the next snippet, or complete the page after the last one.
    pub fn next(&mut self, content: &mut ContentStore) -> DetailStep {
        let Some(page) = self.page.as_mut() else {
            return DetailStep::Unchanged;
        };
        if page.overview || page.completed {
            return DetailStep::Unchanged;
        }
        if page.snippet_index + 1 < page.snippet_count {
            page.snippet_index += 1;
            page.progress = progress_for(page.snippet_index, page.snippet_count);
            return DetailStep::Advanced {
                index: page.snippet_index,
                progress: page.progress,
            };
        }
        page.completed = true;
        page.progress = 100.0;
        let newly_visited = content.mark_visited(page.location_id);
        if newly_visited {
            log::debug!("location {} visited", page.location_id);
        }
        DetailStep::Completed { newly_visited }
    }

    /// Step back one snippet. From the completed state this returns to the
    /// last snippet; at snippet 0 it does nothing.
    pub fn previous(&mut self) -> DetailStep {
        let Some(page) = self.page.as_mut() else {
            return DetailStep::Unchanged;
        };
        if page.completed {
            page.completed = false;
        } else if page.snippet_index > 0 {
            page.snippet_index -= 1;
        } else {
            return DetailStep::Unchanged;
        }
        page.progress = progress_for(page.snippet_index, page.snippet_count);
        DetailStep::Advanced {
            index: page.snippet_index,
            progress: page.progress,
        }
    }

    #[must_use]
    pub fn current_snippet<'a>(&self, content: &'a ContentStore) -> Option<&'a str> {
        let page = self.page.as_ref()?;
        content
            .location(page.location_id)?
            .info
            .get(page.snippet_index)
            .map(String::as_str)
    }

    /// Highlight for the current snippet, cycling through the location's
    /// areas.
    #[must_use]
    pub fn highlight(&self, content: &ContentStore) -> Option<HighlightFrame> {
        let page = self.page.as_ref()?;
        let location = content.location(page.location_id)?;
        highlight_for(&location.highlight_areas, page.snippet_index)
    }

    /// Ask to leave for the story of the open location. Returns `None` (and
    /// logs) when no page is open, the location has no story, or a hand-off
    /// is already pending.
    pub fn continue_to_story(&mut self, content: &ContentStore) -> Option<StoryHandoff> {
        let page = self.page.filter(DetailPage::can_continue)?;
        let story = match content.story_for_location(page.location_id) {
            Ok(story) => story.id.clone(),
            Err(err) => {
                log::warn!("cannot continue: {err}");
                return None;
            }
        };
        let ticket = self.handoff.try_acquire()?;
        Some(StoryHandoff {
            ticket,
            story,
            delay_ms: STORY_HANDOFF_DELAY_MS,
        })
    }

    /// Confirm a hand-off once its delay elapsed. Stale tickets (the page was
    /// closed or reopened meanwhile) are refused.
    pub fn complete_handoff(&mut self, ticket: TransitionTicket) -> bool {
        self.handoff.release(ticket)
    }
}
