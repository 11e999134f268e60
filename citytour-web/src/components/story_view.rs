use crate::components::progress_bar::ProgressBar;
use crate::gesture::use_touch_swipe;
use crate::i18n::t;
use crate::paths::image_path;
use citytour_core::{Slide, StoryFrame, Swipe};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub slides: Vec<Slide>,
    pub frame: StoryFrame,
    /// Plays the slide-out animation.
    #[prop_or_default]
    pub exiting: bool,
    pub on_back: Callback<()>,
    pub on_next: Callback<()>,
    pub on_exit: Callback<()>,
    pub on_swipe: Callback<Swipe>,
}

fn emit_unit(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

/// One slide image, zoomed and cropped to its viewport height. Keyed by
/// index so the incoming slide keeps its element when the outgoing one goes.
fn render_slide(slide: &Slide, index: usize, class: &'static str) -> Html {
    let zoom = slide.zoom_or_identity();
    html! {
        <div key={index} class={classes!("slide", class)} style={format!("height: {}%", slide.height_pct())}>
            <img src={image_path(&slide.image)} alt={slide.title.clone()}
                style={format!("transform: {}", zoom.css_transform())} />
        </div>
    }
}

#[function_component(StoryView)]
pub fn story_view(p: &Props) -> Html {
    let swipe = use_touch_swipe(p.on_swipe.clone());
    let frame = p.frame;
    let Some(current) = p.slides.get(frame.index) else {
        return Html::default();
    };
    let outgoing = frame.outgoing.and_then(|index| {
        p.slides
            .get(index)
            .map(|slide| render_slide(slide, index, "outgoing"))
    });
    let slides = outgoing
        .into_iter()
        .chain(std::iter::once(render_slide(current, frame.index, "current")));
    let section_class = classes!("story-view", p.exiting.then_some("exiting"));
    let text_class = classes!("slide-text", frame.text_visible.then_some("visible"));
    html! {
        <section class={section_class} aria-roledescription="slideshow" aria-label={p.title.clone()}
            ontouchstart={swipe.ontouchstart} ontouchend={swipe.ontouchend}>
            <div class="slide-stage">{ for slides }</div>
            <div class={text_class}>
                <h2>{ current.title.clone() }</h2>
                <p>{ current.description.clone() }</p>
            </div>
            <ProgressBar value={frame.progress} label={p.title.clone()} />
            <nav class="story-nav">
                <button class="btn" aria-label={t("story.previous")} onclick={emit_unit(&p.on_back)}>{ "‹" }</button>
                <button class="btn" aria-label={t("story.home")} onclick={emit_unit(&p.on_exit)}>{ "⌂" }</button>
                if frame.at_last {
                    <button class="btn btn-primary finish" onclick={emit_unit(&p.on_exit)}>{ t("story.finish") }</button>
                } else {
                    <button class="btn" aria-label={t("story.next")} onclick={emit_unit(&p.on_next)}>{ "›" }</button>
                }
            </nav>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytour_core::{AdvanceOutcome, ContentStore, Direction, StoryId, StoryPlayer};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew::virtual_dom::Key;

    fn render(player: &StoryPlayer) -> String {
        render_with(player, false)
    }

    fn render_with(player: &StoryPlayer, exiting: bool) -> String {
        let props = Props {
            title: AttrValue::from("Linke Tür"),
            slides: player.slides().to_vec(),
            frame: player.frame(),
            exiting,
            on_back: Callback::noop(),
            on_next: Callback::noop(),
            on_exit: Callback::noop(),
            on_swipe: Callback::noop(),
        };
        block_on(LocalServerRenderer::<StoryView>::with_props(props).render())
    }

    fn player(id: &str) -> StoryPlayer {
        let content = ContentStore::load_from_static();
        let story = content.story(&StoryId::new(id)).expect("bundled story");
        StoryPlayer::new(story).expect("story has slides")
    }

    #[test]
    fn first_slide_shows_text_and_next_button() {
        crate::i18n::set_lang("de");
        let html = render(&player("left-door"));
        assert!(html.contains("slide-text visible"), "{html}");
        assert!(html.contains("slide current"), "{html}");
        assert!(!html.contains("outgoing"), "{html}");
        assert!(!html.contains("finish"), "{html}");
    }

    #[test]
    fn fading_out_hides_the_text() {
        let mut player = player("left-door");
        assert!(matches!(player.advance(Direction::Next), AdvanceOutcome::Started(_)));
        let html = render(&player);
        assert!(!html.contains("slide-text visible"), "{html}");
    }

    #[test]
    fn cross_fade_keeps_the_outgoing_slide_underneath() {
        let mut player = player("right-door");
        let AdvanceOutcome::Started(pending) = player.advance(Direction::Next) else {
            panic!("transition should start");
        };
        assert!(player.settle(pending.ticket).is_some());
        assert!(player.image_loaded(pending.ticket));
        let html = render(&player);
        assert!(html.contains("slide outgoing"), "{html}");
        assert!(html.contains("rathaustuer-rechts.webp"), "{html}");
    }

    #[test]
    fn last_slide_offers_the_way_out() {
        let mut player = player("farmer-craftsman");
        let AdvanceOutcome::Started(pending) = player.advance(Direction::Next) else {
            panic!("transition should start");
        };
        assert!(player.settle(pending.ticket).is_some());
        assert!(player.finish(pending.ticket));
        let html = render(&player);
        assert!(html.contains("btn btn-primary finish"), "{html}");
        assert!(!html.contains("slide outgoing"), "{html}");
    }

    #[test]
    fn slides_are_keyed_by_index() {
        let player = player("right-door");
        let slides = player.slides();
        let current = render_slide(&slides[1], 1, "current");
        let outgoing = render_slide(&slides[0], 0, "outgoing");
        assert_eq!(current.key(), Some(&Key::from(1_usize)));
        assert_eq!(outgoing.key(), Some(&Key::from(0_usize)));
    }

    #[test]
    fn closing_story_slides_out() {
        let player = player("left-door");
        assert!(!render(&player).contains("story-view exiting"));
        let html = render_with(&player, true);
        assert!(html.contains("story-view exiting"), "{html}");
    }
}
