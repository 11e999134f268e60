use crate::components::location_card::LocationCard;
use crate::gesture::use_hammer_swipe;
use crate::i18n::t;
use citytour_core::{Location, LocationId, MarkerStyle, Swipe};
use yew::prelude::*;

/// DOM id of the carousel viewport, measured to centre the focused card.
pub const CAROUSEL_ID: &str = "location-carousel";

#[derive(Clone, PartialEq)]
pub struct CardView {
    pub location: Location,
    pub style: MarkerStyle,
    pub focused: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub cards: Vec<CardView>,
    /// Track offset in pixels from the carousel adapter.
    pub offset: f64,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
    pub on_card_click: Callback<LocationId>,
    pub on_hover: Callback<(LocationId, bool)>,
    pub on_swipe: Callback<Swipe>,
}

#[function_component(Carousel)]
pub fn carousel(p: &Props) -> Html {
    let track = use_node_ref();
    use_hammer_swipe(&track, p.on_swipe.clone());

    let previous = {
        let cb = p.on_previous.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let next = {
        let cb = p.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cards = p.cards.iter().map(|card| {
        html! {
            <LocationCard
                key={card.location.id}
                location={card.location.clone()}
                style={card.style}
                focused={card.focused}
                on_click={p.on_card_click.clone()}
                on_hover={p.on_hover.clone()}
            />
        }
    });
    let offset = p.offset.max(0.0);
    html! {
        <div class="carousel" role="region" aria-label={t("carousel.label")}>
            <button class="carousel-nav prev" aria-label={t("carousel.previous")} onclick={previous}>{ "‹" }</button>
            <div id={CAROUSEL_ID} class="carousel-viewport" ref={track}>
                <div class="carousel-track" style={format!("transform: translateX(-{offset}px)")}>
                    { for cards }
                </div>
            </div>
            <button class="carousel-nav next" aria-label={t("carousel.next")} onclick={next}>{ "›" }</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytour_core::{CarouselAdapter, ContentStore};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_every_location_and_the_track_offset() {
        crate::i18n::set_lang("de");
        let content = ContentStore::load_from_static();
        let mut adapter = CarouselAdapter::new(&content);
        adapter.focus_location(3);
        let cards: Vec<CardView> = content
            .locations()
            .iter()
            .map(|location| CardView {
                location: location.clone(),
                style: adapter.marker_style(location),
                focused: adapter.is_focused(location.id),
            })
            .collect();
        let props = Props {
            cards,
            offset: adapter.scroll_offset(472.0),
            on_previous: Callback::noop(),
            on_next: Callback::noop(),
            on_card_click: Callback::noop(),
            on_hover: Callback::noop(),
            on_swipe: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Carousel>::with_props(props).render());
        assert_eq!(html.matches("location-card").count(), content.locations().len());
        assert_eq!(html.matches("aria-current=\"true\"").count(), 1);
        // 3 * 236 - (472 - 236) / 1.75
        assert!(html.contains("translateX(-573.142857"), "{html}");
    }

    #[test]
    fn negative_offsets_pin_the_track_to_the_start() {
        let props = Props {
            cards: Vec::new(),
            offset: -67.0,
            on_previous: Callback::noop(),
            on_next: Callback::noop(),
            on_card_click: Callback::noop(),
            on_hover: Callback::noop(),
            on_swipe: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Carousel>::with_props(props).render());
        assert!(html.contains("translateX(-0px)"), "{html}");
    }
}
