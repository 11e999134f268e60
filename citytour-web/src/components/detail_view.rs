use crate::components::progress_bar::ProgressBar;
use crate::gesture::use_touch_swipe;
use crate::i18n::t;
use crate::paths::image_path;
use citytour_core::{DetailPage, HighlightFrame, Location, LocationId, Swipe};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub location: Location,
    pub page: DetailPage,
    #[prop_or_default]
    pub snippet: Option<AttrValue>,
    #[prop_or_default]
    pub highlight: Option<HighlightFrame>,
    /// Child stops listed on overview pages.
    #[prop_or_default]
    pub children: Vec<Location>,
    pub has_story: bool,
    pub on_back: Callback<()>,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
    pub on_continue: Callback<()>,
    pub on_open: Callback<LocationId>,
    pub on_swipe: Callback<Swipe>,
}

fn emit_unit(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

/// Grayscale base image with the highlighted region cut out in colour,
/// both zoomed onto the region.
fn render_image(location: &Location, highlight: Option<&HighlightFrame>) -> Html {
    let src = image_path(&location.image);
    let Some(frame) = highlight else {
        return html! {
            <div class="detail-image">
                <img src={src} alt={location.name.clone()} />
            </div>
        };
    };
    let transform = format!("transform: {}", frame.css_transform());
    let clip = format!(
        "{transform}; clip-path: {}",
        frame.area.clip_insets().css_clip_path()
    );
    html! {
        <div class="detail-image highlighting">
            <img class="grayscale" src={src.clone()} alt={location.name.clone()} style={transform} />
            <img class="highlight-overlay" src={src} alt="" aria-hidden="true" style={clip} />
        </div>
    }
}

fn render_overview(p: &Props) -> Html {
    let children = p.children.iter().map(|child| {
        let id = child.id;
        let open = {
            let cb = p.on_open.clone();
            Callback::from(move |_| cb.emit(id))
        };
        html! {
            <li key={id}>
                <button class="btn child-link" onclick={open}>{ child.name.clone() }</button>
            </li>
        }
    });
    html! {
        <div class="overview">
            <p>{ t("detail.choose_door") }</p>
            <ul class="child-list">{ for children }</ul>
        </div>
    }
}

fn render_pager(p: &Props) -> Html {
    let page = p.page;
    let body = if page.completed {
        html! { <p class="completed-message" role="status">{ t("detail.completed") }</p> }
    } else {
        html! { <p class="info-snippet" aria-live="polite">{ p.snippet.clone().unwrap_or_default() }</p> }
    };
    html! {
        <>
            <ProgressBar value={page.progress} label={AttrValue::from(t("detail.progress"))} />
            { body }
            <div class="detail-nav">
                <button class="btn" aria-label={t("detail.previous")} disabled={!page.has_previous()}
                    onclick={emit_unit(&p.on_previous)}>{ "‹" }</button>
                if !page.completed {
                    <button class="btn" aria-label={t("detail.next")}
                        onclick={emit_unit(&p.on_next)}>{ "›" }</button>
                }
            </div>
            if p.has_story && page.can_continue() {
                <button class="btn btn-primary continue" onclick={emit_unit(&p.on_continue)}>
                    { t("detail.continue") }
                </button>
            }
        </>
    }
}

#[function_component(DetailView)]
pub fn detail_view(p: &Props) -> Html {
    let swipe = use_touch_swipe(p.on_swipe.clone());
    let body = if p.page.overview {
        render_overview(p)
    } else {
        render_pager(p)
    };
    html! {
        <article class="detail-view" aria-labelledby="detail-title"
            ontouchstart={swipe.ontouchstart} ontouchend={swipe.ontouchend}>
            if p.page.completed || p.page.overview {
                <button class="btn back" onclick={emit_unit(&p.on_back)}>{ t("detail.back_to_map") }</button>
            }
            { render_image(&p.location, p.highlight.as_ref()) }
            <h2 id="detail-title">{ p.location.name.clone() }</h2>
            <p class="detail-description">{ p.location.description.clone() }</p>
            { body }
            if let Some(url) = p.location.maps_url.clone() {
                <a class="maps-link" href={url} target="_blank" rel="noopener">{ t("detail.open_maps") }</a>
            }
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytour_core::{ContentStore, DetailController};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(id: LocationId, steps: usize) -> String {
        let mut content = ContentStore::load_from_static();
        let mut detail = DetailController::new();
        let mut page = detail.open(&content, id).expect("open bundled location");
        for _ in 0..steps {
            detail.next(&mut content);
            page = *detail.page().expect("page stays open");
        }
        let location = content.location(id).cloned().expect("location");
        let children = location
            .children
            .iter()
            .filter_map(|child| content.location(*child).cloned())
            .collect();
        let props = Props {
            has_story: location.story.is_some(),
            location,
            page,
            snippet: detail.current_snippet(&content).map(|s| AttrValue::from(s.to_string())),
            highlight: detail.highlight(&content),
            children,
            on_back: Callback::noop(),
            on_previous: Callback::noop(),
            on_next: Callback::noop(),
            on_continue: Callback::noop(),
            on_open: Callback::noop(),
            on_swipe: Callback::noop(),
        };
        block_on(LocalServerRenderer::<DetailView>::with_props(props).render())
    }

    #[test]
    fn first_snippet_shows_highlight_and_continue() {
        crate::i18n::set_lang("de");
        let html = render(1, 0);
        assert!(html.contains("info-snippet"), "{html}");
        assert!(html.contains("highlight-overlay"), "{html}");
        assert!(html.contains("clip-path: inset("), "{html}");
        assert!(html.contains("scale(2.5)"), "{html}");
        assert!(html.contains("continue"), "{html}");
        assert!(html.contains("disabled"), "previous is disabled on the first snippet: {html}");
        assert!(!html.contains("btn back"), "back to map waits for completion: {html}");
    }

    #[test]
    fn completed_page_hides_next_and_continue() {
        let html = render(4, 2);
        assert!(html.contains("completed-message"), "{html}");
        assert!(html.contains("width: 100%"), "{html}");
        assert!(!html.contains("btn btn-primary continue"), "{html}");
        assert!(html.contains("btn back"), "{html}");
    }

    #[test]
    fn overview_lists_its_doors() {
        let html = render(0, 0);
        assert!(html.contains("child-list"), "{html}");
        assert!(html.contains("Linke Rathaust"), "{html}");
        assert!(html.contains("Rechte Rathaust"), "{html}");
        assert!(html.contains("maps-link"), "{html}");
        assert!(!html.contains("progressbar"), "{html}");
        assert!(html.contains("btn back"), "{html}");
    }
}
