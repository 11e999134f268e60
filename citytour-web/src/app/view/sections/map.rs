use crate::app::state::AppState;
use crate::app::view::AppHandlers;
use crate::components::carousel::{CAROUSEL_ID, CardView, Carousel};
use crate::i18n::t;
use citytour_core::constants::CARD_WIDTH_PX;
use yew::prelude::*;

pub fn render_map(state: &AppState, handlers: &AppHandlers) -> Html {
    let (cards, offset) = state.read(|session| {
        let carousel = session.carousel();
        let cards: Vec<CardView> = session
            .content()
            .locations()
            .iter()
            .map(|location| CardView {
                location: location.clone(),
                style: carousel.marker_style(location),
                focused: carousel.is_focused(location.id),
            })
            .collect();
        let width = crate::dom::element_width(CAROUSEL_ID).unwrap_or(CARD_WIDTH_PX);
        (cards, carousel.scroll_offset(width))
    });
    let notice = (*state.map_error).clone().map(|message| {
        html! { <p class="map-error" role="alert">{ message }</p> }
    });
    html! {
        <div class="map-layout">
            <div id={crate::map::MAP_CONTAINER_ID} class="map-container" role="application"
                aria-label={t("map.label")}></div>
            { notice.unwrap_or_default() }
            <Carousel
                {cards}
                {offset}
                on_previous={handlers.carousel_previous.clone()}
                on_next={handlers.carousel_next.clone()}
                on_card_click={handlers.location_click.clone()}
                on_hover={handlers.hover.clone()}
                on_swipe={handlers.carousel_swipe.clone()}
            />
        </div>
    }
}
