use crate::app::state::AppState;
use crate::app::view::AppHandlers;
use crate::components::detail_view::DetailView;
use crate::components::story_view::StoryView;
use citytour_core::TourSession;
use yew::prelude::*;

fn render_story(session: &TourSession, handlers: &AppHandlers, exiting: bool) -> Option<Html> {
    let player = session.stage().player()?;
    let title = session
        .content()
        .story(player.story_id())
        .map_or_else(String::new, |story| story.title.clone());
    Some(html! {
        <StoryView
            title={AttrValue::from(title)}
            slides={player.slides().to_vec()}
            frame={player.frame()}
            {exiting}
            on_back={handlers.story_back.clone()}
            on_next={handlers.story_next.clone()}
            on_exit={handlers.story_exit.clone()}
            on_swipe={handlers.story_swipe.clone()}
        />
    })
}

fn render_page(session: &TourSession, handlers: &AppHandlers) -> Option<Html> {
    let detail = session.detail();
    let page = *detail.page()?;
    let content = session.content();
    let location = content.location(page.location_id)?.clone();
    let children = location
        .children
        .iter()
        .filter_map(|id| content.location(*id).cloned())
        .collect::<Vec<_>>();
    let has_story = location.story.is_some();
    Some(html! {
        <DetailView
            {has_story}
            {location}
            {page}
            snippet={detail.current_snippet(content).map(|s| AttrValue::from(s.to_string()))}
            highlight={detail.highlight(content)}
            {children}
            on_back={handlers.back_to_map.clone()}
            on_previous={handlers.info_previous.clone()}
            on_next={handlers.info_next.clone()}
            on_continue={handlers.continue_story.clone()}
            on_open={handlers.open_location.clone()}
            on_swipe={handlers.detail_swipe.clone()}
        />
    })
}

/// The running story replaces the page it was started from.
pub fn render_detail(state: &AppState, handlers: &AppHandlers) -> Html {
    let exiting = state.story_exiting();
    state.read(|session| {
        render_story(session, handlers, exiting)
            .or_else(|| render_page(session, handlers))
            .unwrap_or_default()
    })
}
