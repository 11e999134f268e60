use crate::i18n::t;
use crate::paths::image_path;
use citytour_core::{Location, LocationId, MarkerStyle};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub location: Location,
    pub style: MarkerStyle,
    pub focused: bool,
    pub on_click: Callback<LocationId>,
    pub on_hover: Callback<(LocationId, bool)>,
}

fn card_class(style: MarkerStyle, focused: bool) -> Classes {
    classes!(
        "location-card",
        focused.then_some("active"),
        style.highlighted.then_some("highlighted"),
        style.visited.then_some("visited"),
        style.disabled.then_some("locked"),
    )
}

#[function_component(LocationCard)]
pub fn location_card(p: &Props) -> Html {
    let id = p.location.id;
    let onclick = {
        let cb = p.on_click.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let onmouseenter = {
        let cb = p.on_hover.clone();
        Callback::from(move |_| cb.emit((id, true)))
    };
    let onmouseleave = {
        let cb = p.on_hover.clone();
        Callback::from(move |_| cb.emit((id, false)))
    };
    let badge = if p.style.disabled {
        html! { <span class="card-badge locked">{ t("carousel.locked") }</span> }
    } else if p.style.visited {
        html! { <span class="card-badge visited">{ t("carousel.visited") }</span> }
    } else {
        Html::default()
    };
    html! {
        <article class={card_class(p.style, p.focused)} data-location={id.to_string()}
            aria-disabled={p.style.disabled.to_string()} aria-current={p.focused.then_some("true")}
            {onclick} {onmouseenter} {onmouseleave}>
            <img loading="lazy" src={image_path(&p.location.image)} alt={p.location.name.clone()} />
            <div class="card-body">
                <h3>{ p.location.name.clone() }</h3>
                <p>{ p.location.description.clone() }</p>
                { badge }
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytour_core::ContentStore;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(id: LocationId, style: MarkerStyle, focused: bool) -> String {
        let location = ContentStore::load_from_static()
            .location(id)
            .cloned()
            .expect("bundled location");
        let props = Props {
            location,
            style,
            focused,
            on_click: Callback::noop(),
            on_hover: Callback::noop(),
        };
        block_on(LocalServerRenderer::<LocationCard>::with_props(props).render())
    }

    #[test]
    fn locked_card_is_marked_disabled() {
        let style = MarkerStyle {
            disabled: true,
            ..MarkerStyle::default()
        };
        let html = render(6, style, false);
        assert!(html.contains("locked"), "{html}");
        assert!(html.contains("aria-disabled=\"true\""), "{html}");
        assert!(html.contains("loading=\"lazy\""), "{html}");
    }

    #[test]
    fn focused_card_is_active_and_highlighted() {
        let style = MarkerStyle {
            highlighted: true,
            visited: true,
            disabled: false,
        };
        let html = render(2, style, true);
        assert!(html.contains("active"), "{html}");
        assert!(html.contains("highlighted"), "{html}");
        assert!(html.contains("card-badge visited"), "{html}");
        assert!(html.contains("Rechte Rathaust"), "{html}");
    }
}
